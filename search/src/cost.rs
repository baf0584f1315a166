//! Equivalence classes, the discernibility cost metric, and the
//! branch-and-bound lower bound.
//!
//! All three are defined purely in terms of a head-set's induced
//! anonymization `sort(head ∪ M)`: `generate_eq_classes` partitions the
//! encoded rows by their representative under that anonymization,
//! `compute_cost` scores the partition, and `compute_lower_bound` scores the
//! best partition reachable from `head` without yet committing to a cut.

use std::collections::BTreeMap;

use kanon_core::domain::EncodedTable;
use lru::LruCache;

/// One equivalence class: its representative tuple and member count.
pub type EqClass = (Vec<u32>, usize);

/// Bounded cache of `anonymization -> equivalence classes`, shared across a
/// single `k` run. Every head-set search revisits the same anonymizations
/// repeatedly, so this is the dominant cost saving in the search.
pub type EqClassCache = LruCache<Vec<u32>, Vec<EqClass>>;

/// Default bound on the number of distinct anonymizations cached per run.
/// Generous relative to realistic `|σ|`; exists to cap memory on adversarial
/// inputs rather than to trim hot-path hits.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Partition the encoded table's rows by their representative under the
/// anonymization induced by `head`, memoized in `cache`.
pub fn generate_eq_classes<'a>(
    table: &EncodedTable,
    cache: &'a mut EqClassCache,
    head: &[u32],
) -> &'a [EqClass] {
    let anonymization = table.anonymization_for(head);
    cache
        .get_or_insert(anonymization.clone(), || {
            let mut counts: BTreeMap<Vec<u32>, usize> = BTreeMap::new();
            for row in table.rows() {
                let rep = table.representative_tuple(&anonymization, row);
                *counts.entry(rep).or_insert(0) += 1;
            }
            counts.into_iter().collect()
        })
        .as_slice()
}

/// The discernibility cost of anonymizing under `head`: one point per
/// suppressed cut (`|σ| - |head|`), plus `size^2` per equivalence class of
/// size `size >= k`. Classes smaller than `k` cost `size * table_size` under
/// suppression, or make the whole head-set infinitely costly otherwise.
#[allow(clippy::cast_precision_loss)]
pub fn compute_cost(
    table: &EncodedTable,
    cache: &mut EqClassCache,
    head: &[u32],
    k: usize,
    use_suppression: bool,
) -> f64 {
    let table_size = table.row_count();
    let eq_classes = generate_eq_classes(table, cache, head);
    let mut cost = (table.sigma().len() - head.len()) as f64;
    for &(_, size) in eq_classes {
        if size >= k {
            cost += (size * size) as f64;
        } else if use_suppression {
            cost += (size * table_size) as f64;
        } else {
            return f64::INFINITY;
        }
    }
    cost
}

/// A lower bound on the cost reachable from `head` by further cutting into
/// `all` (`head`'s current tail candidates, unioned in). Infinite if `head`
/// already yields a class smaller than `k` (no further cutting shrinks a
/// class, so such a head-set can never become valid).
#[allow(clippy::cast_precision_loss)]
pub fn compute_lower_bound(
    table: &EncodedTable,
    cache: &mut EqClassCache,
    head: &[u32],
    all: &[u32],
    k: usize,
) -> f64 {
    let eqc_head = generate_eq_classes(table, cache, head);
    if eqc_head.iter().any(|&(_, size)| size < k) {
        return f64::INFINITY;
    }
    let eqc_all = generate_eq_classes(table, cache, all);
    let generalization_cost = (table.sigma().len() - all.len()) as f64;
    let min_cost: f64 = eqc_all.iter().map(|&(_, size)| (size * size.max(k)) as f64).sum();
    min_cost + generalization_cost
}

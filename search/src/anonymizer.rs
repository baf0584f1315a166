//! Optimal k-anonymization search: the Bayardo-style branch-and-bound
//! `k_anonymize`/`prune` recursion over head-sets, plus the decode step that
//! turns the winning head-set into output rows.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use kanon_core::domain::EncodedTable;
use kanon_core::table::Table;
use kanon_core::group_by::group_by;
use tracing::{debug, info, instrument};

use crate::cost::{compute_cost, compute_lower_bound, EqClassCache, DEFAULT_CACHE_CAPACITY};
use crate::error::SearchError;

/// Memoization key for `prune`: a head/tail pair is re-explored verbatim
/// whenever the same `best_cost` recurs during a run, exactly as in the
/// Bayardo `CALL_CACHE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PruneKey {
    head: Vec<u32>,
    tail: Vec<u32>,
    best_cost_bits: u64,
}

/// The outcome of an optimal-k-anonymization run: the winning head-set, its
/// discernibility cost, and the decoded output rows in original row order.
#[derive(Debug, Clone)]
pub struct AnonymizationResult {
    pub head_set: Vec<u32>,
    pub cost: f64,
    pub k: usize,
    pub rows: Vec<Vec<String>>,
    /// Original row index (into the `EncodedTable` this search ran over) that
    /// each element of `rows` was decoded from, in the same order. Needed by
    /// callers that must re-attach non-QI columns: when suppression drops
    /// rows, `rows` and the original table are no longer in lockstep.
    pub kept_row_indices: Vec<usize>,
}

impl AnonymizationResult {
    /// Whether suppression discarded every row: the `EmptyResult` condition
    /// of SPEC_FULL.md §7 ("all groups fail the suppression threshold;
    /// anonymization yields zero rows"). Not an error -- a stopping
    /// condition a k-sweep caller checks for between runs. Reachable
    /// whenever the search's own optimum puts every equivalence class below
    /// `k` (e.g. a QI column whose values are all distinct, with
    /// suppression enabled and `k >= 2`): the fully-specific head can beat
    /// the fully-general one on cost while still suppressing every row.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Finds the minimum-cost head-set that makes every equivalence class at
/// least `k`, then decodes the anonymized table.
///
/// One `Anonymizer` is built per quasi-identifier group; its caches are
/// scoped to a single `k` run and are not meant to be reused across `k`
/// values (mirrors the Python `_reset_state` contract).
pub struct Anonymizer<'a> {
    table: &'a EncodedTable,
    use_suppression: bool,
    k: usize,
    eq_class_cache: EqClassCache,
    prune_cache: HashMap<PruneKey, Vec<u32>>,
    best_head: Vec<u32>,
    best_cost: f64,
}

impl<'a> Anonymizer<'a> {
    #[must_use]
    pub fn new(table: &'a EncodedTable, use_suppression: bool) -> Self {
        Self {
            table,
            use_suppression,
            k: 1,
            eq_class_cache: EqClassCache::new(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap()),
            prune_cache: HashMap::new(),
            best_head: Vec::new(),
            best_cost: f64::INFINITY,
        }
    }

    /// The largest `k` this table can ever be asked to anonymize for: its
    /// row count.
    #[must_use]
    pub fn k_max(&self) -> usize {
        self.table.row_count()
    }

    /// Run the search for `k`, returning the winning head-set's decoded
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::KOutOfRange`] if `k` is not in `[1, k_max]`.
    #[instrument(skip(self), fields(k, k_max = self.k_max()))]
    pub fn run(&mut self, k: usize) -> Result<AnonymizationResult, SearchError> {
        let k_max = self.k_max();
        if k < 1 || k > k_max {
            return Err(SearchError::KOutOfRange { k, k_max });
        }
        self.k = k;
        self.best_head = Vec::new();
        self.best_cost = f64::INFINITY;
        self.prune_cache.clear();
        self.eq_class_cache.clear();

        let sigma = self.table.sigma().to_vec();
        let cost = self.kano(Vec::new(), sigma, f64::INFINITY);
        info!(cost, head_len = self.best_head.len(), "search finished");

        let (rows, kept_row_indices) = self.decode_output();
        Ok(AnonymizationResult { head_set: self.best_head.clone(), cost, k, rows, kept_row_indices })
    }

    /// The Bayardo `k_anonymize` recursion: try the current head, then try
    /// extending it by each remaining tail value in turn, pruning the tail
    /// after every attempt.
    fn kano(&mut self, head: Vec<u32>, tail: Vec<u32>, best_cost: f64) -> f64 {
        let head_cost = compute_cost(self.table, &mut self.eq_class_cache, &head, self.k, self.use_suppression);
        let mut c = best_cost.min(head_cost);
        if c < self.best_cost {
            self.best_head = head.clone();
            self.best_cost = c;
        }

        let mut t = self.prune(&head, tail, c);
        while let Some(&v) = t.first() {
            let mut h_new = head.clone();
            h_new.push(v);
            h_new.sort_unstable();
            t.retain(|&x| x != v);

            c = self.kano(h_new.clone(), t.clone(), c);
            if c < self.best_cost {
                self.best_head = h_new;
                self.best_cost = c;
            }
            t = self.prune(&head, t, c);
        }
        c
    }

    /// Memoized wrapper around `_prune`.
    fn prune(&mut self, head: &[u32], tail: Vec<u32>, best_cost: f64) -> Vec<u32> {
        let key = PruneKey { head: head.to_vec(), tail: tail.clone(), best_cost_bits: best_cost.to_bits() };
        if let Some(cached) = self.prune_cache.get(&key) {
            return cached.clone();
        }
        let result = self.prune_uncached(head, tail, best_cost);
        self.prune_cache.insert(key, result.clone());
        result
    }

    /// Drop tail values that cannot possibly improve on `best_cost`: a value
    /// `v` is dropped once the best achievable cost of every continuation
    /// through `v` is provably worse than `best_cost`.
    fn prune_uncached(&mut self, head: &[u32], tail: Vec<u32>, best_cost: f64) -> Vec<u32> {
        let mut all_set: Vec<u32> = head.iter().chain(tail.iter()).copied().collect();
        all_set.sort_unstable();

        let lower_bound = compute_lower_bound(self.table, &mut self.eq_class_cache, head, &all_set, self.k);
        if lower_bound >= best_cost {
            return Vec::new();
        }

        let mut t_new = tail.clone();
        for &v in &tail {
            let mut h_new: Vec<u32> = head.to_vec();
            h_new.push(v);
            h_new.sort_unstable();
            let mut param_t_new = t_new.clone();
            param_t_new.retain(|&x| x != v);

            if self.prune(&h_new, param_t_new, best_cost).is_empty() {
                let cost_h_new = compute_cost(self.table, &mut self.eq_class_cache, &h_new, self.k, self.use_suppression);
                if cost_h_new > best_cost {
                    t_new.retain(|&x| x != v);
                }
            }
        }

        if t_new == tail {
            t_new
        } else {
            debug!(dropped = tail.len() - t_new.len(), "tail narrowed");
            self.prune(head, t_new, best_cost)
        }
    }

    /// Decode every row under the winning head-set, then -- if suppression
    /// is enabled -- drop rows whose generalized QI group still falls below
    /// `k`. Returns the surviving decoded rows alongside their original row
    /// indices, so callers can re-attach non-QI columns.
    fn decode_output(&self) -> (Vec<Vec<String>>, Vec<usize>) {
        let decoded: Vec<Vec<String>> =
            self.table.rows().iter().map(|row| self.table.decode_row(&self.best_head, row)).collect();

        if !self.use_suppression {
            let indices = (0..decoded.len()).collect();
            return (decoded, indices);
        }

        let attributes = self.table.attributes().to_vec();
        let labeled = Table::from_rows(attributes.clone(), decoded.clone())
            .expect("decoded rows match the attribute schema width");
        let groups = group_by(&labeled, &attributes).expect("attributes are the labeled table's own schema");

        let mut keep = vec![false; decoded.len()];
        for indices in groups.values() {
            if indices.len() >= self.k {
                for &i in indices {
                    keep[i] = true;
                }
            }
        }

        decoded
            .into_iter()
            .zip(keep)
            .enumerate()
            .filter_map(|(i, (row, kept))| kept.then_some((row, i)))
            .unzip()
    }
}

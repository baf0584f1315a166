//! Greedy l-diversity post-processor: merges minimum-diversity
//! equivalence classes until every class reaches sensitive-attribute
//! diversity `>= l`, minimizing a weighted (info-loss, diversity-deficit)
//! cost at each step.

use std::collections::{BTreeMap, BTreeSet};

use kanon_core::label::{format_generalization, parse_generalization};
use kanon_core::table::Table;
use tracing::{debug, info, instrument};

use crate::error::DiversityError;

/// The `w` weight in `merge_cost = w * info_cost + (1 - w) * div_cost`.
pub const DEFAULT_MERGE_WEIGHT: f64 = 0.5;

/// A class label: one sorted, deduplicated set of original values per QI
/// attribute, in QI column order. Kept as tuples rather than a single
/// concatenated string so that merging is element-wise and reversible.
type Label = Vec<String>;

fn distinct_count(values: impl Iterator<Item = impl AsRef<str>>) -> usize {
    values.map(|v| v.as_ref().to_string()).collect::<BTreeSet<_>>().len()
}

fn div(indices: &[usize], sensitive_col: &[String]) -> usize {
    distinct_count(indices.iter().map(|&i| sensitive_col[i].as_str()))
}

fn info_cost(n1: usize, n2: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let (n1, n2) = (n1 as f64, n2 as f64);
    (n1 + n2).powi(2) - n1.powi(2) - n2.powi(2)
}

#[allow(clippy::cast_precision_loss)]
fn div_cost(l: usize, merged_div: usize) -> f64 {
    l.saturating_sub(merged_div) as f64
}

fn merge_cost(l: usize, a: &[usize], b: &[usize], sensitive_col: &[String], w: f64) -> f64 {
    let mut merged = a.to_vec();
    merged.extend_from_slice(b);
    let merged_div = div(&merged, sensitive_col);
    w * info_cost(a.len(), b.len()) + (1.0 - w) * div_cost(l, merged_div)
}

/// Merge two labels element-wise: each attribute's result is the sorted
/// union of both inputs' member sets, reformatted through the shared
/// generalization wire format.
fn merge_labels(a: &Label, b: &Label) -> Label {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let members: BTreeSet<&str> =
                parse_generalization(x).into_iter().chain(parse_generalization(y)).collect();
            let sorted: Vec<&str> = members.into_iter().collect();
            format_generalization(&sorted)
        })
        .collect()
}

/// The label (and minimum diversity) of the class with the smallest
/// sensitive-attribute diversity, scanned in `order` so ties resolve to the
/// first class encountered -- matching the source implementation's
/// plain-dict-iteration tie-break (see `order`'s doc comment below for why
/// this must not be the map's own sorted order).
fn min_div_group(order: &[Label], groups: &BTreeMap<Label, Vec<usize>>, sensitive_col: &[String]) -> (Label, usize) {
    let mut min_label: Option<Label> = None;
    let mut min_div = usize::MAX;
    for label in order {
        let d = div(&groups[label], sensitive_col);
        if d < min_div {
            min_div = d;
            min_label = Some(label.clone());
        }
    }
    (min_label.expect("groups is non-empty"), min_div)
}

/// Post-process a k-anonymized table so that every QI equivalence class
/// reaches sensitive-attribute diversity `>= l`, by greedily merging the
/// least-diverse class with whichever partner minimizes the weighted
/// (info-loss, diversity-deficit) merge cost, until either every class
/// qualifies or only one class remains.
///
/// # Errors
///
/// Returns [`DiversityError::InsufficientDiversity`] if the table-wide
/// sensitive-attribute diversity is already below `l` (no merge sequence
/// can manufacture values that are not present at all), or a wrapped
/// [`kanon_core::CoreError`] if `qi`/`sensitive` do not name columns of
/// `table`.
pub fn post_process(table: &Table, qi: &[String], sensitive: &str, l: usize) -> Result<Table, DiversityError> {
    post_process_weighted(table, qi, sensitive, l, DEFAULT_MERGE_WEIGHT)
}

/// [`post_process`] with an explicit merge-cost weight `w`, for callers that
/// want to favor information-loss or diversity-deficit differently than the
/// `0.5` default.
///
/// # Errors
///
/// See [`post_process`].
#[instrument(skip(table, qi), fields(l, w))]
pub fn post_process_weighted(
    table: &Table,
    qi: &[String],
    sensitive: &str,
    l: usize,
    w: f64,
) -> Result<Table, DiversityError> {
    let sensitive_idx = table.column_index(sensitive)?;
    let sensitive_col = table.column(sensitive_idx).to_vec();

    let table_div = distinct_count(sensitive_col.iter());
    if table_div < l {
        return Err(DiversityError::InsufficientDiversity { available: table_div, required: l });
    }

    let mut qi_sorted = qi.to_vec();
    qi_sorted.sort();
    let qi_idxs: Vec<usize> =
        qi_sorted.iter().map(|name| table.column_index(name)).collect::<Result<_, _>>()?;

    let mut groups: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
    for row in 0..table.len() {
        let label: Label = qi_idxs.iter().map(|&idx| table.column(idx)[row].clone()).collect();
        groups.entry(label).or_default().push(row);
    }

    // Traversal order for tie-breaking, tracked explicitly rather than
    // relying on `groups`'s own (sorted) key order: the source's
    // `post_process_k_anonymity` groups rows with a plain `dict`, whose
    // initial insertion order matches ascending key order (pandas
    // `groupby` sorts by default), but every merge step does
    // `del groups[min_label]; del groups[partner_label];
    // groups[new_label] = new_group`, which appends the merged label at the
    // *end* of the dict's iteration order rather than at its sorted
    // position. `min_div_group` and the partner-search loop below both
    // break ties on "first encountered in iteration" (SPEC_FULL.md
    // C4 step 3a/3b), so matching that tie-break requires this same
    // append-at-the-end order, not `BTreeMap`'s sort order.
    let mut order: Vec<Label> = groups.keys().cloned().collect();

    let initial_classes = groups.len();
    let mut merges = 0usize;
    loop {
        let (min_label, min_div) = min_div_group(&order, &groups, &sensitive_col);
        if min_div >= l || groups.len() <= 1 {
            break;
        }

        let min_indices = groups[&min_label].clone();
        let mut best_partner: Option<Label> = None;
        let mut best_cost = f64::INFINITY;
        for label in &order {
            if *label == min_label {
                continue;
            }
            let cost = merge_cost(l, &min_indices, &groups[label], &sensitive_col, w);
            if cost < best_cost {
                best_cost = cost;
                best_partner = Some(label.clone());
            }
        }
        let partner_label = best_partner.expect("more than one group remains in this branch");
        let partner_indices = groups[&partner_label].clone();

        let new_label = merge_labels(&min_label, &partner_label);
        let mut merged_indices = min_indices;
        merged_indices.extend(partner_indices);

        groups.remove(&min_label);
        groups.remove(&partner_label);
        groups.entry(new_label.clone()).or_default().extend(merged_indices);

        order.retain(|label| *label != min_label && *label != partner_label);
        order.push(new_label);

        merges += 1;
        debug!(merges, remaining_classes = groups.len(), "merged a minimum-diversity class");
    }
    info!(initial_classes, final_classes = groups.len(), merges, "l-diversity post-processing finished");

    let mut columns: Vec<Vec<String>> =
        (0..table.schema().len()).map(|idx| table.column(idx).to_vec()).collect();
    for (label, indices) in &groups {
        for &row in indices {
            for (col_pos, &col_idx) in qi_idxs.iter().enumerate() {
                columns[col_idx][row] = label[col_pos].clone();
            }
        }
    }

    Ok(Table::from_columns(table.schema().to_vec(), columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_wide_insufficient_diversity_is_rejected() {
        let table = Table::from_rows(
            vec!["age".into(), "sex".into()],
            vec![vec!["20".into(), "F".into()], vec!["30".into(), "F".into()]],
        )
        .unwrap();
        let err = post_process(&table, &["age".to_string()], "sex", 2).unwrap_err();
        assert_eq!(err, DiversityError::InsufficientDiversity { available: 1, required: 2 });
    }

    #[test]
    fn merges_low_diversity_class_into_a_two_diverse_class() {
        // A: {F, F} (div=1), B: {F, M} (div=2). l=2: A must merge with B.
        let table = Table::from_rows(
            vec!["age".into(), "sex".into()],
            vec![
                vec!["20".into(), "F".into()],
                vec!["20".into(), "F".into()],
                vec!["30".into(), "F".into()],
                vec!["30".into(), "M".into()],
            ],
        )
        .unwrap();
        let merged = post_process(&table, &["age".to_string()], "sex", 2).unwrap();
        let age_col = merged.column(merged.column_index("age").unwrap());
        assert!(age_col.iter().all(|v| v == "{20; 30}"));
    }

    #[test]
    fn already_diverse_table_is_unchanged() {
        let table = Table::from_rows(
            vec!["age".into(), "sex".into()],
            vec![
                vec!["20".into(), "F".into()],
                vec!["20".into(), "M".into()],
                vec!["30".into(), "F".into()],
                vec!["30".into(), "M".into()],
            ],
        )
        .unwrap();
        let merged = post_process(&table, &["age".to_string()], "sex", 2).unwrap();
        assert_eq!(merged, table);
    }

    #[test]
    fn min_div_group_breaks_ties_by_insertion_order_not_by_label_sort() {
        // Two classes tie on div=2. Inserted in the reverse of their
        // lexicographic label order ("{50; 60}" before "{10; 20}") -- the
        // shape a merged label takes after a few merge rounds, where
        // BTreeMap's own ascending-key order no longer agrees with when
        // each label was actually produced. The tie must resolve to
        // whichever is first in `order`, not whichever sorts first as a
        // string.
        let mut groups: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
        groups.insert(vec!["{50; 60}".to_string()], vec![0, 1]);
        groups.insert(vec!["{10; 20}".to_string()], vec![2, 3]);
        let sensitive_col = vec!["F".to_string(), "M".to_string(), "F".to_string(), "M".to_string()];
        let order = vec![vec!["{50; 60}".to_string()], vec!["{10; 20}".to_string()]];

        let (label, div) = min_div_group(&order, &groups, &sensitive_col);
        assert_eq!(label, vec!["{50; 60}".to_string()]);
        assert_eq!(div, 2);
    }
}

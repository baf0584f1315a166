//! `get_l_distinct`: minimum sensitive-attribute diversity across a table's
//! quasi-identifier equivalence classes.
//!
//! Used by the driver's sweep bookkeeping (`l_initial` in `setup.json`, the
//! per-step diversity check in `experiments.csv`) -- not the post-processor
//! itself, which has its own table-wide diversity check.

use std::collections::BTreeSet;

use kanon_core::error::CoreError;
use kanon_core::group_by::group_by;
use kanon_core::table::Table;

/// The minimum number of distinct `sensitive` values across all `qi`
/// equivalence classes.
///
/// Floors at `1` when the computed minimum is `0`: an empty group can't
/// arise from a real groupby, but the floor is preserved from the source
/// implementation's defensive behavior and documented here rather than
/// silently dropped.
///
/// # Errors
///
/// Returns [`CoreError::UnknownAttribute`] if `sensitive` or any `qi` column
/// is not in the table's schema, or [`CoreError::EmptyDomain`] if the table
/// has no rows.
pub fn l_distinct(table: &Table, qi: &[String], sensitive: &str) -> Result<usize, CoreError> {
    let sensitive_idx = table.column_index(sensitive)?;
    let sensitive_col = table.column(sensitive_idx);

    let groups = group_by(table, qi)?;
    let min = groups
        .values()
        .map(|indices| {
            indices.iter().map(|&i| sensitive_col[i].as_str()).collect::<BTreeSet<_>>().len()
        })
        .min()
        .ok_or(CoreError::EmptyDomain)?;

    Ok(if min > 0 { min } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_rows(
            vec!["age".into(), "sex".into()],
            vec![
                vec!["20".into(), "F".into()],
                vec!["20".into(), "F".into()],
                vec!["30".into(), "F".into()],
                vec!["30".into(), "M".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn returns_minimum_across_groups() {
        let t = table();
        let l = l_distinct(&t, &["age".to_string()], "sex").unwrap();
        assert_eq!(l, 1);
    }

    #[test]
    fn single_row_group_has_diversity_one() {
        // Every group always has at least one row, so `min` computed over
        // non-empty groups can never actually be 0 in this data model; the
        // `else { 1 }` floor in `l_distinct` is unreachable defensive code
        // preserved from the source (see module docs), not exercised here.
        let t = Table::from_rows(
            vec!["age".into(), "sex".into()],
            vec![vec!["20".into(), "F".into()]],
        )
        .unwrap();
        let l = l_distinct(&t, &["age".to_string()], "sex").unwrap();
        assert_eq!(l, 1);
    }
}

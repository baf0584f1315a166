//! `get_k`: current minimum equivalence-class size and group count over a
//! set of quasi-identifier columns.
//!
//! Used by the driver's sweep bookkeeping (`k_initial` in `setup.json`,
//! `k_call` in `experiments.csv`) -- not part of the fairness measurement
//! pipeline, which stays out of scope.

use crate::error::CoreError;
use crate::group_by::group_by;
use crate::table::Table;

/// Returns `(k, n_groups)`: the size of the smallest QI equivalence class,
/// and the number of distinct QI value-combinations.
///
/// # Errors
///
/// Returns [`CoreError::UnknownAttribute`] if any `qi` column is not in the
/// table's schema, or [`CoreError::EmptyDomain`] if the table has no rows.
pub fn current_k(table: &Table, qi: &[String]) -> Result<(usize, usize), CoreError> {
    let groups = group_by(table, qi)?;
    let k = groups.values().map(Vec::len).min().ok_or(CoreError::EmptyDomain)?;
    Ok((k, groups.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_k_is_the_smallest_group() {
        let table = Table::from_rows(
            vec!["age".into()],
            vec![
                vec!["20".into()],
                vec!["20".into()],
                vec!["20".into()],
                vec!["30".into()],
                vec!["30".into()],
                vec!["30".into()],
                vec!["40".into()],
                vec!["40".into()],
                vec!["40".into()],
                vec!["40".into()],
            ],
        )
        .unwrap();
        let (k, n_groups) = current_k(&table, &["age".to_string()]).unwrap();
        assert_eq!(k, 3);
        assert_eq!(n_groups, 3);
    }

    #[test]
    fn empty_table_is_an_error() {
        let table = Table::from_rows(vec!["age".into()], vec![]).unwrap();
        assert!(matches!(
            current_k(&table, &["age".to_string()]),
            Err(CoreError::EmptyDomain)
        ));
    }
}

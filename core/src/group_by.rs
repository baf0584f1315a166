//! Canonical groupby utility.
//!
//! Every "group rows by a set of columns" operation in this crate family --
//! partitioning (the partitioned driver), k/l measurement, diversity-class
//! partitioning -- goes through this one function, so that grouping
//! semantics (column order, key formation) are defined exactly once.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::table::Table;

/// Group row indices of `table` by their values in `columns`.
///
/// Returns a `BTreeMap` rather than a `HashMap`: callers that iterate the
/// result (partitioning, diversity merging) get a deterministic key order
/// for free, matching this codebase's general preference for ordered
/// containers at determinism-sensitive seams.
///
/// # Errors
///
/// Returns [`CoreError::UnknownAttribute`] if any column name is not in the
/// table's schema.
pub fn group_by(
    table: &Table,
    columns: &[String],
) -> Result<BTreeMap<Vec<String>, Vec<usize>>, CoreError> {
    let idxs: Vec<usize> = columns.iter().map(|c| table.column_index(c)).collect::<Result<_, _>>()?;
    let mut groups: BTreeMap<Vec<String>, Vec<usize>> = BTreeMap::new();
    for row in 0..table.len() {
        let key: Vec<String> = idxs.iter().map(|&i| table.column(i)[row].clone()).collect();
        groups.entry(key).or_default().push(row);
    }
    Ok(groups)
}

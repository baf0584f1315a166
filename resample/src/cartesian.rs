//! Cartesian resampler: expand every generalized QI cell into the full set
//! of its constituent values, then take the Cartesian product over the QI
//! columns of a row. A row with generalized cells of sizes `s_1..s_n`
//! produces `Π s_i` output rows; non-QI columns replicate verbatim and a
//! `row_id` column preserves provenance back to the anonymized row it came
//! from.

use std::collections::HashMap;

use itertools::Itertools;
use kanon_core::label::parse_generalization;
use kanon_core::table::Table;

use crate::error::ResampleError;

/// Expand `table`'s generalized `qi` cells into their Cartesian product.
///
/// # Errors
///
/// Returns [`ResampleError`] if any `qi` name is not in the table's schema.
pub fn resample_cartesian(table: &Table, qi: &[String]) -> Result<Table, ResampleError> {
    let qi_idxs: Vec<usize> = qi.iter().map(|name| table.column_index(name)).collect::<Result<_, _>>()?;

    let mut schema = vec!["row_id".to_string()];
    schema.extend(table.schema().iter().cloned());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row_idx in 0..table.len() {
        let row = table.row(row_idx);
        let member_lists: Vec<Vec<&str>> =
            qi_idxs.iter().map(|&idx| parse_generalization(row[idx])).collect();

        for combo in member_lists.into_iter().multi_cartesian_product() {
            let substituted: HashMap<usize, &str> = qi_idxs.iter().copied().zip(combo).collect();
            let mut out_row = Vec::with_capacity(schema.len());
            out_row.push(row_idx.to_string());
            for (col_idx, &cell) in row.iter().enumerate() {
                out_row.push(substituted.get(&col_idx).copied().unwrap_or(cell).to_string());
            }
            rows.push(out_row);
        }
    }

    Ok(Table::from_rows(schema, rows)?)
}

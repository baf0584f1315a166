//! Shared helpers for `kanon` benchmark suites: a thin library of setup
//! builders so the `benches/` binaries measure only the search itself, not
//! synthetic-table construction.

use kanon_core::domain::{self, EncodedTable};
use kanon_core::table::Table;

/// A synthetic single-attribute QI table with `n_values` distinct values,
/// each repeated `rows_per_value` times, domain-sorted as `"v{0}".."v{n}"`.
///
/// Used to scale the candidate-cut count `|σ|` (one less than `n_values`)
/// independently of the dataset size, so benches can separate "wider
/// domain" from "more rows" regimes.
#[must_use]
pub fn synthetic_single_attribute_table(n_values: usize, rows_per_value: usize) -> Table {
    let mut rows = Vec::with_capacity(n_values * rows_per_value);
    for v in 0..n_values {
        for _ in 0..rows_per_value {
            rows.push(vec![format!("v{v:04}")]);
        }
    }
    Table::from_rows(vec!["attr".to_string()], rows).expect("well-formed synthetic rows")
}

/// A synthetic multi-attribute QI table: `n_attrs` columns, each with
/// `n_values` distinct values, `rows_per_combo` rows per distinct
/// combination of the first attribute's value (other attributes cycle
/// independently so the domain is genuinely multi-dimensional).
#[must_use]
pub fn synthetic_multi_attribute_table(n_attrs: usize, n_values: usize, rows_per_combo: usize) -> Table {
    let schema: Vec<String> = (0..n_attrs).map(|i| format!("attr{i}")).collect();
    let mut rows = Vec::with_capacity(n_values * rows_per_combo);
    for combo in 0..n_values {
        for r in 0..rows_per_combo {
            let row: Vec<String> = (0..n_attrs)
                .map(|a| format!("v{:04}", (combo + a * r) % n_values))
                .collect();
            rows.push(row);
        }
    }
    Table::from_rows(schema, rows).expect("well-formed synthetic rows")
}

/// Encode a synthetic table against its own single `attr` column, ready to
/// hand to `kanon_search::Anonymizer::new`.
///
/// # Panics
///
/// Panics if `table` has no rows (synthetic builders never produce this).
#[must_use]
pub fn encode_single_attribute(table: &Table) -> EncodedTable {
    domain::encode(table, &["attr".to_string()]).expect("synthetic table encodes cleanly")
}

/// Encode a synthetic multi-attribute table against all of its columns.
///
/// # Panics
///
/// Panics if `table` has no rows (synthetic builders never produce this).
#[must_use]
pub fn encode_multi_attribute(table: &Table) -> EncodedTable {
    let qi = table.schema().to_vec();
    domain::encode(table, &qi).expect("synthetic table encodes cleanly")
}

//! End-to-end scenario fixtures for the k-anonymization/l-diversity
//! pipeline. The scenarios themselves live in `tests/scenarios.rs`; this
//! crate exists only to host shared fixture builders in one library
//! target rather than duplicating them across test files.

use kanon_core::table::Table;

/// A single `age` QI column with domain `{20, 30, 40}` appearing
/// `{3, 3, 4}` times.
#[must_use]
pub fn tiny_age_table() -> Table {
    let mut rows = Vec::new();
    for value in ["20", "20", "20", "30", "30", "30", "40", "40", "40", "40"] {
        rows.push(vec![value.to_string()]);
    }
    Table::from_rows(vec!["age".to_string()], rows).unwrap()
}

/// A single `sex` QI column with domain `{F, M}` appearing `{1, 9}` times.
#[must_use]
pub fn skewed_sex_table() -> Table {
    let mut rows = vec![vec!["F".to_string()]];
    rows.extend((0..9).map(|_| vec!["M".to_string()]));
    Table::from_rows(vec!["sex".to_string()], rows).unwrap()
}

/// Three `race` groups of 100 rows each, with identical `age`
/// distributions inside every group.
#[must_use]
pub fn partitioned_race_age_table() -> Table {
    let mut schema_rows = Vec::new();
    for race in ["W", "B", "A"] {
        for age in ["20", "20", "20", "30", "30", "30", "30", "40", "40", "40"] {
            for _ in 0..10 {
                schema_rows.push(vec![race.to_string(), age.to_string()]);
            }
        }
    }
    Table::from_rows(vec!["race".to_string(), "age".to_string()], schema_rows).unwrap()
}

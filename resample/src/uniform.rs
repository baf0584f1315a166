//! Uniform resampler: replace every generalized QI cell with one value
//! chosen uniformly at random from its constituent set. Row count is
//! unchanged.

use kanon_core::label::parse_generalization;
use kanon_core::table::Table;
use rand::Rng;

use crate::error::ResampleError;

/// Replace every generalized `qi` cell of `table` with a uniformly-sampled
/// member of its set, using `rng` as the source of randomness.
///
/// Generic over `R: Rng` rather than reaching for a thread-local generator
/// so that callers needing reproducible output (tests, fixed-seed sweeps)
/// can pass a seeded `rand::rngs::StdRng`.
///
/// # Errors
///
/// Returns [`ResampleError`] if any `qi` name is not in the table's schema.
pub fn resample_uniform<R: Rng + ?Sized>(
    table: &Table,
    qi: &[String],
    rng: &mut R,
) -> Result<Table, ResampleError> {
    let qi_idxs: Vec<usize> = qi.iter().map(|name| table.column_index(name)).collect::<Result<_, _>>()?;

    let mut columns: Vec<Vec<String>> =
        (0..table.schema().len()).map(|idx| table.column(idx).to_vec()).collect();

    for &col_idx in &qi_idxs {
        for row_idx in 0..table.len() {
            let members = parse_generalization(&table.column(col_idx)[row_idx]);
            let choice = members[rng.random_range(0..members.len())];
            columns[col_idx][row_idx] = choice.to_string();
        }
    }

    Ok(Table::from_columns(table.schema().to_vec(), columns)?)
}

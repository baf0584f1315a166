//! The persisted-file surface a sweep-loop binary reads and writes around
//! this crate: `setup.json`, one `K{k}L{l}.csv` per produced table, and
//! `experiments.csv`. This crate models the typed read/write contract;
//! driving a loop across increasing `k` that calls these in sequence
//! remains the sweep binary's job.

use std::io::{Read, Write};

use kanon_core::table::Table;
use serde::{Deserialize, Serialize};

use crate::error::DriverError;

/// `setup.json`: the fixed record written once per experiment configuration,
/// before the k-sweep begins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetupDescriptor {
    /// Admissible attributes.
    #[serde(rename = "A")]
    pub admissible: Vec<String>,
    /// Inadmissible attributes.
    #[serde(rename = "I")]
    pub inadmissible: Vec<String>,
    /// Outcome attribute.
    #[serde(rename = "O")]
    pub outcome: String,
    /// Sensitive attribute.
    #[serde(rename = "S")]
    pub sensitive: String,
    /// Quasi-identifiers actually passed to the anonymizer.
    #[serde(rename = "QI")]
    pub quasi_identifiers: Vec<String>,
    pub k_initial: usize,
    pub l_initial: usize,
    pub n_groups: usize,
    pub k_max: usize,
    pub n: usize,
}

impl SetupDescriptor {
    /// Serialize to the `setup.json` wire format.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Json`] if serialization fails (only possible
    /// for pathological `String` contents -- this type has no cyclic or
    /// non-serializable fields).
    pub fn to_json(&self) -> Result<String, DriverError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a `setup.json` document.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Json`] if `text` is not valid JSON matching
    /// this schema.
    pub fn from_json(text: &str) -> Result<Self, DriverError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write this descriptor to `path` as `setup.json`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Io`] or [`DriverError::Json`].
    pub fn write_to(&self, path: &std::path::Path) -> Result<(), DriverError> {
        let text = self.to_json()?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Read a descriptor previously written by [`SetupDescriptor::write_to`].
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Io`] or [`DriverError::Json`].
    pub fn read_from(path: &std::path::Path) -> Result<Self, DriverError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// The `K{k}L{l}.csv` naming convention for a produced anonymized table.
#[must_use]
pub fn anonymized_table_filename(k: usize, l: usize) -> String {
    format!("K{k}L{l}.csv")
}

/// `K{k}L{l}.csv`: one per `(k, l)` anonymized table produced during a
/// sweep. First column is the row id; remaining columns are the original
/// schema, in order.
pub struct AnonymizedTableFile;

impl AnonymizedTableFile {
    /// Write `table` as a `K{k}L{l}.csv`-shaped CSV: a leading `row_id`
    /// column followed by `table`'s own schema and rows, in order.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Csv`] or [`DriverError::Io`].
    pub fn write<W: Write>(writer: W, table: &Table) -> Result<(), DriverError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut header = vec!["row_id".to_string()];
        header.extend(table.schema().iter().cloned());
        csv_writer.write_record(&header)?;

        for row_idx in 0..table.len() {
            let mut record = vec![row_idx.to_string()];
            record.extend(table.row(row_idx).into_iter().map(ToString::to_string));
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Read a `K{k}L{l}.csv`-shaped CSV back into a [`Table`], dropping the
    /// leading `row_id` column.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Csv`] or a wrapped [`kanon_core::CoreError`]
    /// if the resulting rows do not match the parsed header width.
    pub fn read<R: Read>(reader: R) -> Result<Table, DriverError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let header: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let schema = header[1..].to_vec();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let row: Vec<String> = record.iter().skip(1).map(str::to_string).collect();
            rows.push(row);
        }
        Ok(Table::from_rows(schema, rows)?)
    }
}

/// One row of `experiments.csv`: the bookkeeping recorded after each
/// `(k, l)` step of a sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentRecord {
    pub k: usize,
    pub l: usize,
    pub cost: f64,
    pub duration_secs: f64,
    pub k_call: usize,
    pub n_groups: usize,
}

/// `experiments.csv`: the full sweep log, indexed by `(k, l)`.
pub struct ExperimentLog;

impl ExperimentLog {
    /// Write `records` as `experiments.csv`, one row per record, in the
    /// order given (callers append in sweep order so the file lists steps
    /// chronologically, matching the source's `DataFrame(...)` construction
    /// from parallel per-step lists).
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Csv`] or [`DriverError::Io`].
    pub fn write<W: Write>(writer: W, records: &[ExperimentRecord]) -> Result<(), DriverError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["k", "l", "cost", "duration", "k_call", "n_groups"])?;
        for r in records {
            csv_writer.write_record([
                r.k.to_string(),
                r.l.to_string(),
                r.cost.to_string(),
                r.duration_secs.to_string(),
                r.k_call.to_string(),
                r.n_groups.to_string(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Read back an `experiments.csv` previously written by
    /// [`ExperimentLog::write`].
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Csv`] if a row fails to parse as an
    /// [`ExperimentRecord`].
    pub fn read<R: Read>(reader: R) -> Result<Vec<ExperimentRecord>, DriverError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            records.push(ExperimentRecord {
                k: record[0].parse().map_err(|_| csv_parse_error("k"))?,
                l: record[1].parse().map_err(|_| csv_parse_error("l"))?,
                cost: record[2].parse().map_err(|_| csv_parse_error("cost"))?,
                duration_secs: record[3].parse().map_err(|_| csv_parse_error("duration"))?,
                k_call: record[4].parse().map_err(|_| csv_parse_error("k_call"))?,
                n_groups: record[5].parse().map_err(|_| csv_parse_error("n_groups"))?,
            });
        }
        Ok(records)
    }
}

fn csv_parse_error(field: &str) -> DriverError {
    DriverError::InvalidConfig { detail: format!("experiments.csv: could not parse field `{field}`") }
}

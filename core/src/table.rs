//! Typed columnar table model.
//!
//! Every cell is an opaque string: continuous attributes arrive already
//! bucketed into categorical interval strings by an out-of-scope loader, and
//! QI cells become either an original value or a `{v1; v2; ...}`
//! generalization label (see [`crate::label`]).

use std::cmp::Ordering;

use crate::error::CoreError;

/// A row-and-column-oriented table: one schema, N columns of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    schema: Vec<String>,
    columns: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from a schema and row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SchemaMismatch`] if any row's length does not
    /// match the schema length.
    pub fn from_rows(schema: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, CoreError> {
        let width = schema.len();
        for row in &rows {
            if row.len() != width {
                return Err(CoreError::SchemaMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        let mut columns = vec![Vec::with_capacity(rows.len()); width];
        for row in rows {
            for (col, value) in columns.iter_mut().zip(row) {
                col.push(value);
            }
        }
        Ok(Self { schema, columns })
    }

    /// Build a table directly from columnar data.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SchemaMismatch`] if the column count doesn't
    /// match the schema, or if columns have differing lengths.
    pub fn from_columns(schema: Vec<String>, columns: Vec<Vec<String>>) -> Result<Self, CoreError> {
        if schema.len() != columns.len() {
            return Err(CoreError::SchemaMismatch {
                expected: schema.len(),
                actual: columns.len(),
            });
        }
        let expected_len = columns.first().map_or(0, Vec::len);
        for col in &columns {
            if col.len() != expected_len {
                return Err(CoreError::SchemaMismatch {
                    expected: expected_len,
                    actual: col.len(),
                });
            }
        }
        Ok(Self { schema, columns })
    }

    #[must_use]
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of a named column.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownAttribute`] if `name` is not in the
    /// schema.
    pub fn column_index(&self, name: &str) -> Result<usize, CoreError> {
        self.schema
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| CoreError::UnknownAttribute { attribute: name.to_string() })
    }

    #[must_use]
    pub fn column(&self, idx: usize) -> &[String] {
        &self.columns[idx]
    }

    #[must_use]
    pub fn row(&self, idx: usize) -> Vec<&str> {
        self.columns.iter().map(|c| c[idx].as_str()).collect()
    }

    /// Cell value at (row, column name).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownAttribute`] if `column` is not in the
    /// schema.
    pub fn cell(&self, row: usize, column: &str) -> Result<&str, CoreError> {
        let idx = self.column_index(column)?;
        Ok(self.columns[idx][row].as_str())
    }

    /// Project a subset of columns, preserving row order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownAttribute`] if any name is not in the
    /// schema.
    pub fn project(&self, names: &[String]) -> Result<Table, CoreError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let idx = self.column_index(name)?;
            columns.push(self.columns[idx].clone());
        }
        Table::from_columns(names.to_vec(), columns)
    }

    /// Select a subset of rows (by index), preserving schema. Indices may
    /// repeat or be out of original order.
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|col| indices.iter().map(|&i| col[i].clone()).collect())
            .collect();
        Table { schema: self.schema.clone(), columns }
    }

    /// Concatenate tables sharing the same schema, in argument order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SchemaMismatch`] if any table's schema differs
    /// from the first.
    pub fn concat(tables: Vec<Table>) -> Result<Table, CoreError> {
        let mut iter = tables.into_iter();
        let Some(mut acc) = iter.next() else {
            return Ok(Table { schema: Vec::new(), columns: Vec::new() });
        };
        for t in iter {
            if t.schema != acc.schema {
                return Err(CoreError::SchemaMismatch {
                    expected: acc.schema.len(),
                    actual: t.schema.len(),
                });
            }
            for (col, mut other) in acc.columns.iter_mut().zip(t.columns) {
                col.append(&mut other);
            }
        }
        Ok(acc)
    }

    /// Sort rows lexicographically over the given column order. Used for
    /// deterministic output (anonymization's public contract requires
    /// byte-identical output across identical inputs).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownAttribute`] if any column name is not in
    /// the schema.
    pub fn sorted_by(&self, order: &[String]) -> Result<Table, CoreError> {
        let idxs: Vec<usize> =
            order.iter().map(|n| self.column_index(n)).collect::<Result<_, _>>()?;
        let mut row_order: Vec<usize> = (0..self.len()).collect();
        row_order.sort_by(|&a, &b| {
            for &idx in &idxs {
                let ord = self.columns[idx][a].cmp(&self.columns[idx][b]);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        Ok(self.select_rows(&row_order))
    }
}

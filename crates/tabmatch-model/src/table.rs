//! Column-oriented table with optional text cells.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Normalize a column name for lookup: strip a byte-order mark, trim, lower-case.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// One entry per row; `None` marks a missing value.
    pub values: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a column from plain strings, treating empty strings as missing.
    pub fn from_strs(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(
            name,
            values
                .iter()
                .map(|v| (!v.is_empty()).then(|| (*v).to_string()))
                .collect(),
        )
    }
}

/// Ordered collection of equally long named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a header and row-major cells.
    ///
    /// Every row must have exactly one cell per header.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();
        let row_count = rows.len();
        for row in rows {
            if row.len() != columns.len() {
                return Err(ModelError::LengthMismatch {
                    column: "<row>".to_string(),
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.values.push(cell);
            }
        }
        let mut table = Self {
            columns: Vec::with_capacity(columns.len()),
            row_count,
        };
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Build a table from whole columns.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self {
            columns: Vec::with_capacity(columns.len()),
            row_count: columns.first().map_or(0, |c| c.values.len()),
        };
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Values of a column, failing if it does not exist.
    pub fn values(&self, name: &str) -> Result<&[Option<String>]> {
        self.column(name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| ModelError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    /// Cell at `(row, column)`; `None` if the cell is missing.
    pub fn cell(&self, row: usize, name: &str) -> Result<Option<&str>> {
        Ok(self
            .values(name)?
            .get(row)
            .and_then(|v| v.as_deref()))
    }

    /// Cells of one row in column order.
    pub fn row(&self, index: usize) -> Vec<Option<&str>> {
        self.columns
            .iter()
            .map(|c| c.values.get(index).and_then(|v| v.as_deref()))
            .collect()
    }

    /// Append a new column.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.has_column(&column.name) {
            return Err(ModelError::DuplicateColumn {
                column: column.name,
            });
        }
        self.check_length(&column)?;
        if self.columns.is_empty() {
            self.row_count = column.values.len();
        }
        self.columns.push(column);
        Ok(())
    }

    /// Replace the values of an existing column, or append it.
    pub fn set_column(&mut self, column: Column) -> Result<()> {
        match self.position(&column.name) {
            Some(idx) => {
                self.check_length(&column)?;
                self.columns[idx] = column;
                Ok(())
            }
            None => self.push_column(column),
        }
    }

    /// Rename columns in place. Values are untouched.
    ///
    /// Fails if a source column is absent or a new name collides with a
    /// column that is not itself being renamed away.
    pub fn rename_columns(&mut self, renames: &[(String, String)]) -> Result<()> {
        let mut positions = Vec::with_capacity(renames.len());
        for (from, _) in renames {
            let idx = self
                .position(from)
                .ok_or_else(|| ModelError::ColumnNotFound {
                    column: from.clone(),
                })?;
            positions.push(idx);
        }
        let mut names: Vec<String> = self.columns.iter().map(|c| c.name.clone()).collect();
        for (idx, (_, to)) in positions.iter().zip(renames) {
            names[*idx] = to.clone();
        }
        let mut seen = BTreeSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }
        for (column, name) in self.columns.iter_mut().zip(names) {
            column.name = name;
        }
        Ok(())
    }

    /// Normalize every column name (see [`normalize_column_name`]).
    pub fn normalize_column_names(&mut self) -> Result<()> {
        let renames: Vec<(String, String)> = self
            .columns
            .iter()
            .map(|c| (c.name.clone(), normalize_column_name(&c.name)))
            .filter(|(from, to)| from != to)
            .collect();
        self.rename_columns(&renames)
    }

    /// Sorted set of non-missing values in a column.
    pub fn distinct_values(&self, name: &str) -> Result<BTreeSet<String>> {
        Ok(self.values(name)?.iter().flatten().cloned().collect())
    }

    /// Sorted set of non-missing values in a column, restricted to `rows`.
    pub fn distinct_values_in(&self, name: &str, rows: &[usize]) -> Result<BTreeSet<String>> {
        let values = self.values(name)?;
        Ok(rows
            .iter()
            .filter_map(|&idx| values.get(idx).and_then(Clone::clone))
            .collect())
    }

    /// Group row indices by the tuple of values in `columns`.
    ///
    /// Rows with a missing value in any grouping column belong to no group.
    /// Row indices within a group keep table order.
    pub fn group_rows(&self, columns: &[String]) -> Result<BTreeMap<Vec<String>, Vec<usize>>> {
        let keyed: Vec<&[Option<String>]> = columns
            .iter()
            .map(|name| self.values(name))
            .collect::<Result<_>>()?;
        let mut groups: BTreeMap<Vec<String>, Vec<usize>> = BTreeMap::new();
        'rows: for row in 0..self.row_count {
            let mut key = Vec::with_capacity(keyed.len());
            for values in &keyed {
                match &values[row] {
                    Some(value) => key.push(value.clone()),
                    None => continue 'rows,
                }
            }
            groups.entry(key).or_default().push(row);
        }
        Ok(groups)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    fn check_length(&self, column: &Column) -> Result<()> {
        if !self.columns.is_empty() && column.values.len() != self.row_count {
            return Err(ModelError::LengthMismatch {
                column: column.name.clone(),
                expected: self.row_count,
                actual: column.values.len(),
            });
        }
        Ok(())
    }
}

//! Table-level orchestration: role selection, renaming, and saving.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{info, info_span};

use tabmatch_ingest::{WriteOptions, read_csv_table, write_csv_table};
use tabmatch_model::{AppendDirection, KeyColumns, ModelError, Table, resolved_column_name};

use crate::error::{MatchError, Result};
use crate::hierarchy::match_hierarchical;
use crate::report::MatchReport;

/// Run options for a reconciliation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Which input table receives the resolved columns.
    pub direction: AppendDirection,
    /// Allow cell values (partition keys) in log output.
    pub log_values: bool,
}

impl ReconcileOptions {
    #[must_use]
    pub fn with_direction(mut self, direction: AppendDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_log_values(mut self, enable: bool) -> Self {
        self.log_values = enable;
        self
    }
}

/// Role a table plays in a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableRole {
    Reference,
    Target,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => f.write_str("reference"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Prepared reference/target pair, ready to match.
///
/// Construction normalizes both tables' column names, picks roles from the
/// append direction, and renames the target's key columns to the
/// reference's names.
#[derive(Debug, Clone)]
pub struct Reconciler {
    reference: Table,
    target: Table,
    keys: Vec<String>,
    options: ReconcileOptions,
}

impl Reconciler {
    /// `keys` pairs the first table's key columns with the second's.
    pub fn new(
        first: Table,
        second: Table,
        keys: &KeyColumns,
        options: ReconcileOptions,
    ) -> Result<Self> {
        let (mut reference, mut target, keys) = match options.direction {
            AppendDirection::Second => (first, second, keys.clone()),
            AppendDirection::First => (second, first, keys.swapped()),
        };
        reference.normalize_column_names()?;
        target.normalize_column_names()?;

        let reference_keys = keys.first_names();
        let target_keys = keys.second_names();
        require_columns(&reference, &reference_keys, TableRole::Reference)?;
        require_columns(&target, &target_keys, TableRole::Target)?;
        // A resolved column must never replace a key column still to be matched.
        if let Some(column) = reference_keys
            .iter()
            .map(|k| resolved_column_name(k))
            .find(|resolved| reference_keys.contains(resolved))
        {
            return Err(MatchError::ColumnConflict { column });
        }

        let renames: Vec<(String, String)> = target_keys
            .into_iter()
            .zip(reference_keys.iter().cloned())
            .filter(|(from, to)| from != to)
            .collect();
        target
            .rename_columns(&renames)
            .map_err(|err| match err {
                ModelError::DuplicateColumn { column } => MatchError::ColumnConflict { column },
                other => other.into(),
            })?;

        Ok(Self {
            reference,
            target,
            keys: reference_keys,
            options,
        })
    }

    /// Load both tables from CSV files.
    pub fn from_csv(
        first: &Path,
        second: &Path,
        keys: &KeyColumns,
        options: ReconcileOptions,
    ) -> Result<Self> {
        let first = read_csv_table(first)?;
        let second = read_csv_table(second)?;
        Self::new(first, second, keys, options)
    }

    pub fn reference(&self) -> &Table {
        &self.reference
    }

    /// Target table after renaming, before any resolved column is added.
    pub fn target(&self) -> &Table {
        &self.target
    }

    /// Key column names shared by both tables after renaming.
    pub fn key_columns(&self) -> &[String] {
        &self.keys
    }

    /// Resolve every key column and return the augmented target table.
    pub fn run(self) -> Result<Reconciliation> {
        let span = info_span!(
            "reconcile",
            direction = ?self.options.direction,
            keys = self.keys.len()
        );
        let _guard = span.enter();
        info!(
            reference_rows = self.reference.row_count(),
            target_rows = self.target.row_count(),
            "matching key columns"
        );
        let mut target = self.target;
        let levels = match_hierarchical(&self.reference, &mut target, &self.keys, &self.options)?;
        let report = MatchReport {
            direction: self.options.direction,
            rows: target.row_count(),
            levels,
        };
        Ok(Reconciliation {
            table: target,
            report,
        })
    }
}

fn require_columns(table: &Table, columns: &[String], role: TableRole) -> Result<()> {
    let missing: Vec<String> = columns
        .iter()
        .filter(|c| !table.has_column(c))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MatchError::MissingColumns {
            role,
            columns: missing,
        })
    }
}

/// Augmented target table plus per-column match counts.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub table: Table,
    pub report: MatchReport,
}

impl Reconciliation {
    /// Write the augmented target table as CSV.
    pub fn save(&self, path: &Path, options: WriteOptions) -> Result<()> {
        write_csv_table(&self.table, path, options)?;
        info!(path = %path.display(), rows = self.table.row_count(), "saved output");
        Ok(())
    }
}

//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

use tabmatch_model::ModelError;

/// Errors that can occur while loading or saving tables.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("file {path} is not present")]
    FileNotFound { path: PathBuf },

    /// Failed to read or parse a CSV file.
    #[error("failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to write a CSV file.
    #[error("failed to write CSV {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data row has more fields than the header.
    #[error("{path}: line {line} has {found} fields, header has {expected}")]
    ExtraFields {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Requested columns are absent from the header.
    #[error("the following columns are not present in {path}: {}", .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;

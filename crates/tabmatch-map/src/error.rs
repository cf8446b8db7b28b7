//! Error types for matching operations.

use thiserror::Error;

use tabmatch_ingest::IngestError;
use tabmatch_model::ModelError;

use crate::reconcile::TableRole;

/// Errors from matching operations.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A candidate set had nothing to match against.
    #[error("no candidate values to match against")]
    EmptyCandidates,

    #[error("key column level {level} out of range ({levels} key columns)")]
    LevelOutOfRange { level: usize, levels: usize },

    #[error("{role} table is missing key columns: {}", .columns.join(", "))]
    MissingColumns {
        role: TableRole,
        columns: Vec<String>,
    },

    /// A renamed key column or a resolved column would replace a column the
    /// match still reads.
    #[error("column '{column}' conflicts with a key column of the target table")]
    ColumnConflict { column: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, MatchError>;

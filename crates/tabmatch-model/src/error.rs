use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    #[error("column '{column}' already exists")]
    DuplicateColumn { column: String },

    /// A column's row count disagrees with the table's.
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("key column list is empty")]
    EmptyKeyList,

    #[error("key column lists differ in length: {first} vs {second}")]
    KeyListLength { first: usize, second: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;

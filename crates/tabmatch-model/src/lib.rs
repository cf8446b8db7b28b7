#![deny(unsafe_code)]

pub mod error;
pub mod keys;
pub mod table;

pub use error::{ModelError, Result};
pub use keys::{AppendDirection, KeyColumn, KeyColumns, RESOLVED_SUFFIX, resolved_column_name};
pub use table::{Column, Table, normalize_column_name};

pub mod csv_table;
pub mod error;

pub use csv_table::{
    WriteOptions, check_columns, read_csv_headers, read_csv_table, write_csv, write_csv_table,
};
pub use error::{IngestError, Result};

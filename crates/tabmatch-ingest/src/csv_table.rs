use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::debug;

use tabmatch_model::{Table, normalize_column_name};

use crate::error::{IngestError, Result};

/// Options for saving a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Write a leading unnamed column holding the zero-based row index.
    pub include_index: bool,
}

fn ensure_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

fn normalize_headers(record: &StringRecord) -> Vec<String> {
    record.iter().map(normalize_column_name).collect()
}

fn to_cell(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Load a CSV file with a header row.
///
/// Column names are normalized on load. Empty fields become missing values;
/// all other values are kept verbatim. Short rows are padded with missing
/// values, rows longer than the header are rejected.
pub fn read_csv_table(path: &Path) -> Result<Table> {
    ensure_file(path)?;
    let csv_err = |source| IngestError::CsvRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = normalize_headers(reader.headers().map_err(csv_err)?);
    if headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        if record.len() > headers.len() {
            return Err(IngestError::ExtraFields {
                path: path.to_path_buf(),
                line: record.position().map_or(0, csv::Position::line),
                expected: headers.len(),
                found: record.len(),
            });
        }
        let mut row: Vec<Option<String>> = record.iter().map(to_cell).collect();
        row.resize(headers.len(), None);
        rows.push(row);
    }
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "loaded csv"
    );
    Ok(Table::from_rows(headers, rows)?)
}

/// Read only the header row of a CSV file, normalized.
pub fn read_csv_headers(path: &Path) -> Result<Vec<String>> {
    ensure_file(path)?;
    let csv_err = |source| IngestError::CsvRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = normalize_headers(reader.headers().map_err(csv_err)?);
    if headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(headers)
}

/// Fail with the set of `requested` columns absent from `headers`.
///
/// Both sides are compared after normalization.
pub fn check_columns(path: &Path, headers: &[String], requested: &[String]) -> Result<()> {
    let present: BTreeSet<String> = headers.iter().map(|h| normalize_column_name(h)).collect();
    let missing: BTreeSet<String> = requested
        .iter()
        .map(|c| normalize_column_name(c))
        .filter(|c| !present.contains(c))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing.into_iter().collect(),
        })
    }
}

/// Serialize a table as CSV into any writer.
pub fn write_csv<W: io::Write>(table: &Table, writer: W, options: WriteOptions) -> csv::Result<()> {
    let mut out = WriterBuilder::new().from_writer(writer);
    let mut header: Vec<&str> = Vec::with_capacity(table.columns().len() + 1);
    if options.include_index {
        header.push("");
    }
    header.extend(table.column_names());
    out.write_record(&header)?;
    for idx in 0..table.row_count() {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        if options.include_index {
            record.push(idx.to_string());
        }
        record.extend(
            table
                .row(idx)
                .into_iter()
                .map(|cell| cell.unwrap_or_default().to_string()),
        );
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}

/// Save a table to a CSV file, replacing any existing file.
pub fn write_csv_table(table: &Table, path: &Path, options: WriteOptions) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, io::BufWriter::new(file), options).map_err(|source| {
        IngestError::CsvWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), rows = table.row_count(), "saved csv");
    Ok(())
}

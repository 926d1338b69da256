//! Reading and writing the comma-separated tables.
//!
//! All tables have a header row. Readers check that the columns a pipeline
//! depends on are present before deserializing any row; a missing column or
//! a structurally broken row is a table-level error. Row-level gaps are left
//! as `None` for the pipelines to decide on.

use crate::error::{DataLoadError, Result};
use crate::types::TableRow;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Rows of a table together with its header
#[derive(Debug, Clone)]
pub struct Table<T> {
    pub columns: Vec<String>,
    pub rows: Vec<T>,
}

impl<T> Table<T> {
    /// (rows, columns), printed the way a dataframe shape is
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }
}

/// Read a table from a file, requiring `required` columns in the header.
pub fn read_table<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Table<T>> {
    let name = path.display().to_string();
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound { path: name.clone() },
        _ => DataLoadError::IoError(e),
    })?;
    read_table_from_reader(file, &name, required)
}

/// Read a table from any reader; `name` is used in error messages.
pub fn read_table_from_reader<T, R>(reader: R, name: &str, required: &[&str]) -> Result<Table<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr
        .headers()
        .map_err(|e| DataLoadError::csv(name, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    for column in required {
        if !columns.iter().any(|c| c == column) {
            return Err(DataLoadError::MissingColumn {
                file: name.to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize::<T>() {
        let row = result.map_err(|e| DataLoadError::csv(name, e))?;
        rows.push(row);
    }

    debug!("Read {} rows x {} columns from {}", rows.len(), columns.len(), name);
    Ok(Table { columns, rows })
}

/// Write rows to `path`, replacing any existing file.
pub fn write_table<T: TableRow>(path: &Path, rows: &[T]) -> Result<()> {
    let name = path.display().to_string();
    let file = File::create(path)?;
    write_table_to_writer(file, &name, rows)
}

/// Write rows to any writer. The header is always written.
pub fn write_table_to_writer<T, W>(writer: W, name: &str, rows: &[T]) -> Result<()>
where
    T: TableRow,
    W: Write,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(T::COLUMNS)
        .map_err(|e| DataLoadError::csv(name, e))?;
    for row in rows {
        wtr.serialize(row).map_err(|e| DataLoadError::csv(name, e))?;
    }
    wtr.flush()?;

    debug!("Wrote {} rows to {}", rows.len(), name);
    Ok(())
}

/// The cell's value when it is non-empty after trimming.
///
/// The value itself is returned untrimmed.
pub fn non_blank(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().filter(|s| !s.trim().is_empty())
}

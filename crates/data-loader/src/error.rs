//! Error types for the data-loader crate.
//!
//! Row-level problems (missing mandatory cells, unparseable numbers, broken
//! nested lists) are not errors here: those rows are dropped or degraded by
//! the parsers. The variants below are the table-level failures that stop a
//! run before it starts.

use thiserror::Error;

/// Errors that can occur while reading or writing a table
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader or writer rejected the table structure
    ///
    /// Typically a row with the wrong number of fields.
    #[error("Malformed table {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A column the pipeline depends on is absent from the header row
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// A cell could not be converted to its column type
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },
}

impl DataLoadError {
    pub(crate) fn csv(file: &str, source: csv::Error) -> Self {
        // The csv crate wraps I/O failures; surface a missing file distinctly.
        if let csv::ErrorKind::Io(io) = source.kind() {
            if io.kind() == std::io::ErrorKind::NotFound {
                return DataLoadError::FileNotFound {
                    path: file.to_string(),
                };
            }
        }
        if let csv::ErrorKind::Deserialize { pos: Some(pos), err } = source.kind() {
            return DataLoadError::ParseError {
                file: file.to_string(),
                line: pos.line() as usize,
                reason: err.to_string(),
            };
        }
        DataLoadError::Csv {
            file: file.to_string(),
            source,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

//! Error types for survey point ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading input point files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input path is neither a file nor a directory.
    #[error("input not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Record Errors ===
    /// The file is not valid delimited text.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A record does not carry the id, coordinate, and code columns.
    #[error("{path}:{line}: expected at least 5 fields, found {found}")]
    MissingFields {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    // === Configuration Errors ===
    #[error("delimiter must be a single ASCII character, got {delimiter:?}")]
    Delimiter { delimiter: char },
}

impl IngestError {
    pub(crate) fn from_csv(path: impl Into<PathBuf>, error: csv::Error) -> Self {
        let path = path.into();
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(source) => Self::FileRead { path, source },
            _ => Self::CsvParse { path, message },
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

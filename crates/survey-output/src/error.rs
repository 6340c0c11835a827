//! Error types for survey point export.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[cfg(windows)]
const ERROR_SHARING_VIOLATION: i32 = 32;
#[cfg(windows)]
const ERROR_LOCK_VIOLATION: i32 = 33;

/// Broad class of a write failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteErrorKind {
    /// The destination is held open or locked by another process.
    Busy,
    /// Any other I/O failure.
    Io,
}

impl WriteErrorKind {
    pub fn classify(error: &io::Error) -> Self {
        if error.kind() == io::ErrorKind::ResourceBusy {
            return WriteErrorKind::Busy;
        }
        #[cfg(windows)]
        if matches!(
            error.raw_os_error(),
            Some(ERROR_SHARING_VIOLATION | ERROR_LOCK_VIOLATION)
        ) {
            return WriteErrorKind::Busy;
        }
        WriteErrorKind::Io
    }
}

impl fmt::Display for WriteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteErrorKind::Busy => f.write_str("busy"),
            WriteErrorKind::Io => f.write_str("io"),
        }
    }
}

/// Failure to write an output file or error report.
#[derive(Debug, Error)]
#[error("failed to write {path}: {source}")]
pub struct WriteError {
    pub path: PathBuf,
    pub kind: WriteErrorKind,
    #[source]
    pub source: io::Error,
}

impl WriteError {
    /// Wrap an I/O error, classifying it from its kind and OS code.
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            kind: WriteErrorKind::classify(&source),
            source,
        }
    }

    /// A failure known to be caused by a busy destination.
    pub fn busy(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            kind: WriteErrorKind::Busy,
            source,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.kind == WriteErrorKind::Busy
    }

    pub(crate) fn from_csv(path: impl Into<PathBuf>, error: csv::Error) -> Self {
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(source) => Self::new(path, source),
            _ => Self::new(path, io::Error::other(message)),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, WriteError>;

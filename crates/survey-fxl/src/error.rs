//! Error types for definition loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that make a definition file unusable. Any of these is fatal to a run.
#[derive(Debug, Error)]
pub enum DefinitionError {
    // === File System Errors ===
    /// Definition path does not carry the `.fxl` extension.
    #[error("not an fxl definition file: {path}")]
    Extension { path: PathBuf },

    /// Failed to read the definition file.
    #[error("failed to read definition {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// The document is not well-formed XML.
    #[error("malformed definition {path} at byte {position}: {message}")]
    Xml {
        path: PathBuf,
        position: u64,
        message: String,
    },

    /// The document has no `FeatureDefinition` root element.
    #[error("missing FeatureDefinition root element in {path}")]
    MissingRoot { path: PathBuf },

    // === Structural Errors ===
    /// A definition element has no code.
    #[error("{element} without a Code attribute in {path}")]
    MissingCode { element: String, path: PathBuf },

    #[error("duplicate feature code '{code}' in {path}")]
    DuplicateFeatureCode { code: String, path: PathBuf },

    #[error("duplicate control code '{code}' in {path}")]
    DuplicateControlCode { code: String, path: PathBuf },

    /// The same code is declared both as a feature and as a control code.
    #[error("code '{code}' is both a feature code and a control code in {path}")]
    AmbiguousCode { code: String, path: PathBuf },

    #[error("invalid placement '{value}' for control code '{code}' in {path}")]
    InvalidPlacement {
        code: String,
        value: String,
        path: PathBuf,
    },

    #[error("control code '{code}' has an empty separator in {path}")]
    EmptySeparator { code: String, path: PathBuf },

    #[error("no feature codes defined in {path}")]
    NoFeatureCodes { path: PathBuf },
}

impl DefinitionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for definition loading.
pub type Result<T> = std::result::Result<T, DefinitionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DefinitionError::DuplicateFeatureCode {
            code: "TREE".to_string(),
            path: PathBuf::from("/jobs/site.fxl"),
        };
        assert_eq!(
            err.to_string(),
            "duplicate feature code 'TREE' in /jobs/site.fxl"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = DefinitionError::io(
            "/jobs/missing.fxl",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to read definition /jobs/missing.fxl"));
    }
}

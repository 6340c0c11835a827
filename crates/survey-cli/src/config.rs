//! Run configuration file.
//!
//! ```toml
//! [definition]
//! combination_separator = "+"
//!
//! [definition.decoration]
//! separator = "/"
//! placement = "suffix"
//!
//! [input]
//! layout = "pnezd"
//! delimiter = ","
//! has_header = false
//!
//! [export]
//! group_by_code = false
//! strip_control_codes = false
//! ```
//!
//! Every section and key is optional. Command-line flags take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use survey_fxl::FxlOptions;
use survey_ingest::CsvOptions;
use survey_model::RunOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Export defaults applied when the matching flag is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub group_by_code: bool,
    pub strip_control_codes: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurveyConfig {
    pub definition: FxlOptions,
    pub input: CsvOptions,
    pub export: ExportConfig,
}

impl SurveyConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` when given, otherwise use built-in defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Run options with command-line switches layered over the file.
    pub fn run_options(&self, group_by_code: bool, strip_control_codes: bool) -> RunOptions {
        RunOptions::new(
            group_by_code || self.export.group_by_code,
            strip_control_codes || self.export.strip_control_codes,
        )
    }
}

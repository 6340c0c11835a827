use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Overall result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTier {
    Success,
    PartialSuccess,
    Failure,
}

impl StatusTier {
    pub fn from_counts(files_succeeded: usize, point_errors: usize, write_errors: usize) -> Self {
        if files_succeeded == 0 {
            StatusTier::Failure
        } else if point_errors > 0 || write_errors > 0 {
            StatusTier::PartialSuccess
        } else {
            StatusTier::Success
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusTier::Success => "Success",
            StatusTier::PartialSuccess => "Partial Success",
            StatusTier::Failure => "Failure",
        }
    }
}

impl fmt::Display for StatusTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An output that could not be written because the destination was busy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Terminal summary of a run, rendered once and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub status: StatusTier,
    pub files_succeeded: usize,
    pub outputs_written: usize,
    pub points_failed: usize,
    pub write_failures: usize,
    pub write_errors: Vec<WriteFailure>,
    pub error_report: Option<PathBuf>,
    pub message: String,
}

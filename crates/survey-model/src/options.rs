//! Options controlling how a run exports its points.

use serde::{Deserialize, Serialize};

/// How valid points are partitioned into output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    /// One output per input file, named after the input.
    #[default]
    PerFile,
    /// One `{code}.csv` per feature code across all inputs.
    GroupByCode,
}

impl ExportMode {
    pub fn from_group_flag(group_by_code: bool) -> Self {
        if group_by_code {
            ExportMode::GroupByCode
        } else {
            ExportMode::PerFile
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunOptions {
    pub export_mode: ExportMode,
    /// Replace each valid point's code with its normalized feature code.
    pub strip_control_codes: bool,
}

impl RunOptions {
    pub fn new(group_by_code: bool, strip_control_codes: bool) -> Self {
        Self {
            export_mode: ExportMode::from_group_flag(group_by_code),
            strip_control_codes,
        }
    }
}

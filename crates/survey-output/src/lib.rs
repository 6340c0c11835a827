//! Survey point export.
//!
//! Writes validated points as per-file or per-feature-code CSV outputs and
//! records invalid points in a timestamped error report.

mod error;
mod planner;
mod report;
mod writer;

pub use error::{Result, WriteError, WriteErrorKind};
pub use planner::{
    ExportOutcome, PlannedOutput, code_file_name, ensure_output_dir, export, plan_exports,
};
pub use report::{report_file_name, report_path, write_error_report};
pub use writer::{CsvPointWriter, PointWriter, REPORT_HEADER, point_record};

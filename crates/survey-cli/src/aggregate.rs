//! Run aggregation.
//!
//! Each input file contributes a [`RunTally`]; tallies are merged in input
//! order and then adjusted by the export outcome. The merged tally is turned
//! into the run's [`RunSummary`] exactly once.

use std::path::{Path, PathBuf};

use survey_model::{PointError, RunSummary, StatusTier, WriteFailure};
use survey_output::ExportOutcome;

const CLOSE_FILE_HINT: &str = "Please make sure this file is closed and try again.";
const FIX_REPORT_HINT: &str = "Please review the report, fix the errors, and try again.";
const NOTHING_PARSED: &str = "No survey files were successfully parsed.";

/// Counts and errors accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTally {
    pub input_files: usize,
    pub files_succeeded: usize,
    pub outputs_written: usize,
    pub point_errors: Vec<PointError>,
    pub write_errors: Vec<WriteFailure>,
}

impl RunTally {
    /// Tally for one processed input file.
    pub fn for_file(has_valid_points: bool, point_errors: Vec<PointError>) -> Self {
        Self {
            input_files: 1,
            files_succeeded: usize::from(has_valid_points),
            point_errors,
            ..Self::default()
        }
    }

    /// Combine with the tally of a later file or stage.
    #[must_use]
    pub fn merge(mut self, other: RunTally) -> Self {
        self.input_files += other.input_files;
        self.files_succeeded += other.files_succeeded;
        self.outputs_written += other.outputs_written;
        self.point_errors.extend(other.point_errors);
        self.write_errors.extend(other.write_errors);
        self
    }

    /// Apply the result of writing the outputs.
    #[must_use]
    pub fn with_export(mut self, outcome: ExportOutcome) -> Self {
        self.outputs_written += outcome.outputs_written;
        self.files_succeeded = self
            .files_succeeded
            .saturating_sub(outcome.lost_sources.len());
        self.write_errors.extend(outcome.write_errors);
        self
    }

    pub fn status(&self) -> StatusTier {
        StatusTier::from_counts(
            self.files_succeeded,
            self.point_errors.len(),
            self.write_errors.len(),
        )
    }

    pub fn into_summary(self, error_report: Option<PathBuf>) -> RunSummary {
        let message = render_message(&self, error_report.as_deref());
        RunSummary {
            status: self.status(),
            files_succeeded: self.files_succeeded,
            outputs_written: self.outputs_written,
            points_failed: self.point_errors.len(),
            write_failures: self.write_errors.len(),
            write_errors: self.write_errors,
            error_report,
            message,
        }
    }
}

/// User-facing text describing every outcome of the run.
pub fn render_message(tally: &RunTally, error_report: Option<&Path>) -> String {
    let mut sections: Vec<String> = Vec::new();

    if tally.files_succeeded > 0 {
        let files = plural(tally.files_succeeded, "file", "files");
        let tail = if tally.outputs_written == tally.files_succeeded {
            ".".to_string()
        } else {
            format!(" into {} files.", tally.outputs_written)
        };
        sections.push(format!(
            "{} {files} successfully parsed{tail}",
            tally.files_succeeded
        ));
    }

    if !tally.write_errors.is_empty() {
        let count = tally.write_errors.len();
        let mut lines = vec![format!(
            "{count} {} unable to be written due to file access errors, details below.",
            plural(count, "file was", "files were")
        )];
        for failure in &tally.write_errors {
            lines.push(failure.message.clone());
            lines.push(CLOSE_FILE_HINT.to_string());
        }
        sections.push(lines.join("\n"));
    }

    if !tally.point_errors.is_empty() {
        let count = tally.point_errors.len();
        let subject = if count > 1 {
            format!("were validation errors on {count} points")
        } else {
            "was a validation error on a point".to_string()
        };
        let mut lines = vec![format!(
            "There {subject} while attempting to parse the selected survey CSV {}.",
            plural(tally.input_files, "file", "files")
        )];
        if let Some(path) = error_report {
            lines.push(format!("A detailed report was written here: {}", path.display()));
        }
        lines.push(FIX_REPORT_HINT.to_string());
        sections.push(lines.join("\n"));
    }

    if sections.is_empty() {
        sections.push(NOTHING_PARSED.to_string());
    }
    sections.join("\n\n")
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use survey_model::{InvalidReason, PointField};

    fn point_error(value: &str) -> PointError {
        PointError {
            source_file: "a.csv".to_string(),
            record: 1,
            point_id: "1".to_string(),
            field: PointField::Code,
            value: value.to_string(),
            reason: InvalidReason::UnknownCode,
        }
    }

    #[test]
    fn merge_keeps_error_order() {
        let tally = RunTally::for_file(true, vec![point_error("A")])
            .merge(RunTally::for_file(false, vec![point_error("B")]))
            .merge(RunTally::for_file(true, Vec::new()));
        assert_eq!(tally.input_files, 3);
        assert_eq!(tally.files_succeeded, 2);
        let values: Vec<_> = tally.point_errors.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["A", "B"]);
    }

    #[test]
    fn lost_sources_reduce_successes() {
        let outcome = ExportOutcome {
            outputs_written: 1,
            write_errors: vec![WriteFailure {
                path: PathBuf::from("out/a.csv"),
                message: "busy".to_string(),
            }],
            lost_sources: BTreeSet::from([0]),
        };
        let tally = RunTally::for_file(true, Vec::new())
            .merge(RunTally::for_file(true, Vec::new()))
            .with_export(outcome);
        assert_eq!(tally.files_succeeded, 1);
        assert_eq!(tally.status(), StatusTier::PartialSuccess);
    }

    #[test]
    fn empty_run_is_a_failure() {
        let summary = RunTally::default().into_summary(None);
        assert_eq!(summary.status, StatusTier::Failure);
        assert_eq!(summary.message, NOTHING_PARSED);
    }

    #[test]
    fn success_message_mentions_output_count_only_when_different() {
        let mut tally = RunTally::for_file(true, Vec::new());
        tally.outputs_written = 1;
        assert_eq!(render_message(&tally, None), "1 file successfully parsed.");
        tally.outputs_written = 3;
        assert_eq!(
            render_message(&tally, None),
            "1 file successfully parsed into 3 files."
        );
    }
}

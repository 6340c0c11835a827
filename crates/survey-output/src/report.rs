//! Timestamped error reports.

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use survey_model::PointError;

use crate::error::{Result, WriteError};
use crate::writer::PointWriter;

const REPORT_PREFIX: &str = "SurveyCsvErrorReport_";
const REPORT_TIMESTAMP: &str = "%Y_%m_%d_%H_%M_%S";
const MAX_REPORT_SUFFIX: u32 = 999;

/// `SurveyCsvErrorReport_<year>_<month>_<day>_<hour>_<minute>_<second>.csv`
pub fn report_file_name(timestamp: NaiveDateTime) -> String {
    format!("{REPORT_PREFIX}{}.csv", timestamp.format(REPORT_TIMESTAMP))
}

/// Path for a new report in `dir`. A numeric suffix is added when a report
/// from the same second already exists; an existing report is never reused.
pub fn report_path(dir: &Path, timestamp: NaiveDateTime) -> Result<PathBuf> {
    let stamp = timestamp.format(REPORT_TIMESTAMP).to_string();
    let base = dir.join(report_file_name(timestamp));
    if !base.exists() {
        return Ok(base);
    }
    (2..=MAX_REPORT_SUFFIX)
        .map(|n| dir.join(format!("{REPORT_PREFIX}{stamp}_{n}.csv")))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| {
            WriteError::new(
                &base,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{MAX_REPORT_SUFFIX} reports already exist for {stamp}"),
                ),
            )
        })
}

/// Write the error report into `dir` and return its path.
pub fn write_error_report<W: PointWriter + ?Sized>(
    writer: &W,
    dir: &Path,
    errors: &[PointError],
    timestamp: NaiveDateTime,
) -> Result<PathBuf> {
    let path = report_path(dir, timestamp)?;
    writer.write_report(&path, errors)?;
    info!(path = %path.display(), error_count = errors.len(), "error report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_report_file_name_is_zero_padded_24_hour() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|date| date.and_hms_opt(15, 4, 9))
            .expect("valid timestamp");
        assert_eq!(
            report_file_name(timestamp),
            "SurveyCsvErrorReport_2024_03_07_15_04_09.csv"
        );
    }

    #[test]
    fn test_report_path_skips_taken_names() {
        let dir = tempfile::tempdir().expect("temp dir");
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .expect("valid timestamp");
        let base = dir.path().join(report_file_name(timestamp));
        std::fs::write(&base, "taken").expect("write");
        std::fs::write(
            dir.path().join("SurveyCsvErrorReport_2024_03_07_08_00_00_2.csv"),
            "taken",
        )
        .expect("write");

        let path = report_path(dir.path(), timestamp).expect("free path");

        assert_ne!(path, base);
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("SurveyCsvErrorReport_2024_03_07_08_00_00_3.csv")
        );
    }
}

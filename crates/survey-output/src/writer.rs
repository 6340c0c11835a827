//! CSV writers for exported points and error reports.

use std::fs::File;
use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use survey_model::{ExpandedPoint, PointError};

use crate::error::{Result, WriteError};

/// Column names of the error report.
pub const REPORT_HEADER: [&str; 6] = ["File", "Record", "PointId", "Field", "Value", "Reason"];

/// Destination for exported points and error reports.
pub trait PointWriter {
    /// Write `points` to `path`, replacing any existing file.
    fn write_points(&self, path: &Path, points: &[ExpandedPoint]) -> Result<()>;

    /// Write one report row per error to `path`.
    fn write_report(&self, path: &Path, errors: &[PointError]) -> Result<()>;
}

/// Writes comma-separated files: points without a header row, reports with one.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvPointWriter;

impl CsvPointWriter {
    pub fn new() -> Self {
        Self
    }
}

impl PointWriter for CsvPointWriter {
    fn write_points(&self, path: &Path, points: &[ExpandedPoint]) -> Result<()> {
        let file = File::create(path).map_err(|e| WriteError::new(path, e))?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        for point in points {
            writer
                .write_record(point_record(point))
                .map_err(|e| WriteError::from_csv(path, e))?;
        }
        writer.flush().map_err(|e| WriteError::new(path, e))?;
        debug!(path = %path.display(), point_count = points.len(), "output written");
        Ok(())
    }

    fn write_report(&self, path: &Path, errors: &[PointError]) -> Result<()> {
        let file = File::create(path).map_err(|e| WriteError::new(path, e))?;
        let mut writer = WriterBuilder::new().from_writer(file);
        writer
            .write_record(REPORT_HEADER)
            .map_err(|e| WriteError::from_csv(path, e))?;
        for error in errors {
            let record = error.record.to_string();
            writer
                .write_record([
                    error.source_file.as_str(),
                    record.as_str(),
                    error.point_id.as_str(),
                    error.field.as_str(),
                    error.value.as_str(),
                    error.reason.as_str(),
                ])
                .map_err(|e| WriteError::from_csv(path, e))?;
        }
        writer.flush().map_err(|e| WriteError::new(path, e))?;
        Ok(())
    }
}

/// Output fields of a point: id, code, northing, easting, elevation, attributes.
pub fn point_record(point: &ExpandedPoint) -> Vec<&str> {
    let mut record = Vec::with_capacity(5 + point.attributes.len());
    record.extend([
        point.id.as_str(),
        point.code.as_str(),
        point.coordinates.northing.as_str(),
        point.coordinates.easting.as_str(),
        point.coordinates.elevation.as_str(),
    ]);
    record.extend(point.attributes.iter().map(String::as_str));
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::Coordinates;

    #[test]
    fn test_point_record_field_order() {
        let point = ExpandedPoint {
            record: 3,
            id: "12".to_string(),
            code: "TREE".to_string(),
            coordinates: Coordinates {
                northing: "1.0".to_string(),
                easting: "2.0".to_string(),
                elevation: "3.0".to_string(),
            },
            attributes: vec!["OAK".to_string()],
        };
        assert_eq!(point_record(&point), vec!["12", "TREE", "1.0", "2.0", "3.0", "OAK"]);
    }
}

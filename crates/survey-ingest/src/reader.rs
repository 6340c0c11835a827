//! Delimited survey point files.
//!
//! Field files carry one point per record: an id, three coordinates, and the
//! point code, followed by any number of free-form attribute columns. The two
//! supported layouts differ only in coordinate order.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::debug;

use survey_model::{Coordinates, RawPoint};

use crate::error::{IngestError, Result};

const REQUIRED_FIELDS: usize = 5;

/// Column order of the leading point fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLayout {
    /// Point, northing, easting, elevation, description.
    #[default]
    Pnezd,
    /// Point, easting, northing, elevation, description.
    Penzd,
}

impl ColumnLayout {
    /// Indices of (northing, easting) within a record.
    fn coordinate_indices(self) -> (usize, usize) {
        match self {
            ColumnLayout::Pnezd => (1, 2),
            ColumnLayout::Penzd => (2, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvOptions {
    pub layout: ColumnLayout,
    pub delimiter: char,
    /// Skip the first record as a header row.
    pub has_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::Pnezd,
            delimiter: ',',
            has_header: false,
        }
    }
}

/// Source of raw points for one input file.
pub trait PointReader: Sync {
    fn read_points(&self, path: &Path) -> Result<Vec<RawPoint>>;
}

/// Reads points from delimited text files.
#[derive(Debug, Clone)]
pub struct CsvPointReader {
    layout: ColumnLayout,
    delimiter: u8,
    has_header: bool,
}

impl CsvPointReader {
    pub fn new(options: &CsvOptions) -> Result<Self> {
        if !options.delimiter.is_ascii() {
            return Err(IngestError::Delimiter {
                delimiter: options.delimiter,
            });
        }
        Ok(Self {
            layout: options.layout,
            delimiter: options.delimiter as u8,
            has_header: options.has_header,
        })
    }
}

impl Default for CsvPointReader {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::Pnezd,
            delimiter: b',',
            has_header: false,
        }
    }
}

impl PointReader for CsvPointReader {
    fn read_points(&self, path: &Path) -> Result<Vec<RawPoint>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(self.has_header)
            .flexible(true)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_path(path)
            .map_err(|error| IngestError::from_csv(path, error))?;
        let mut points = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|error| IngestError::from_csv(path, error))?;
            if record.iter().all(|value| normalize_cell(value).is_empty()) {
                continue;
            }
            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or(index as u64 + 1);
            points.push(self.point_from_record(path, &record, line)?);
        }
        debug!(
            path = %path.display(),
            point_count = points.len(),
            "points read"
        );
        Ok(points)
    }
}

impl CsvPointReader {
    fn point_from_record(&self, path: &Path, record: &StringRecord, line: u64) -> Result<RawPoint> {
        if record.len() < REQUIRED_FIELDS {
            return Err(IngestError::MissingFields {
                path: path.to_path_buf(),
                line,
                found: record.len(),
            });
        }
        let field = |idx: usize| normalize_cell(record.get(idx).unwrap_or(""));
        let (northing, easting) = self.layout.coordinate_indices();
        Ok(RawPoint {
            record: usize::try_from(line).unwrap_or(usize::MAX),
            id: field(0),
            code: field(4),
            coordinates: Coordinates {
                northing: field(northing),
                easting: field(easting),
                elevation: field(3),
            },
            attributes: record
                .iter()
                .skip(REQUIRED_FIELDS)
                .map(normalize_cell)
                .collect(),
        })
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

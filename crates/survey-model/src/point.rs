use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Coordinate fields as captured. Kept verbatim so re-exported files carry the
/// surveyor's original precision.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub northing: String,
    pub easting: String,
    pub elevation: String,
}

/// One record as read from an input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPoint {
    /// 1-based line of the record in its source file.
    pub record: usize,
    pub id: String,
    pub code: String,
    pub coordinates: Coordinates,
    pub attributes: Vec<String>,
}

/// A single, non-combined point derived from a [`RawPoint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedPoint {
    pub record: usize,
    pub id: String,
    pub code: String,
    pub coordinates: Coordinates,
    pub attributes: Vec<String>,
}

impl ExpandedPoint {
    /// Copy of `raw` carrying `code` in place of the raw code field.
    pub fn from_raw(raw: &RawPoint, code: impl Into<String>) -> Self {
        Self {
            record: raw.record,
            id: raw.id.clone(),
            code: code.into(),
            coordinates: raw.coordinates.clone(),
            attributes: raw.attributes.clone(),
        }
    }
}

impl From<RawPoint> for ExpandedPoint {
    fn from(raw: RawPoint) -> Self {
        Self {
            record: raw.record,
            id: raw.id,
            code: raw.code,
            coordinates: raw.coordinates,
            attributes: raw.attributes,
        }
    }
}

/// A source file and the points from it that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyFile {
    pub path: PathBuf,
    /// File name shown to users and used for per-file output.
    pub name: String,
    pub points: Vec<ExpandedPoint>,
}

impl SurveyFile {
    pub fn new(path: impl Into<PathBuf>, points: Vec<ExpandedPoint>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name, points }
    }

    pub fn has_points(&self) -> bool {
        !self.points.is_empty()
    }
}

/// Base file name of `path`, falling back to the full path for odd inputs.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

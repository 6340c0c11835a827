//! Point code validation.
//!
//! A point is valid when its code, once control-code decoration is removed,
//! names a known feature code, or when the code is exactly a control code.
//! Validation of one point never depends on another.

use tracing::debug;

use survey_model::{
    Definition, ExpandedPoint, InvalidReason, PointError, PointField, ValidationOutcome,
};

use crate::codes::resolve_feature_code;

pub fn validate_point(point: &ExpandedPoint, definition: &Definition) -> ValidationOutcome {
    let code = point.code.as_str();
    let resolves =
        resolve_feature_code(code, definition.feature_codes(), definition.control_codes())
            .is_some();
    if resolves || definition.is_control_code(code) {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid {
            reason: InvalidReason::UnknownCode,
            field: PointField::Code,
            value: point.code.clone(),
        }
    }
}

/// One outcome per point, in input order.
pub fn validate_points(points: &[ExpandedPoint], definition: &Definition) -> Vec<ValidationOutcome> {
    points
        .iter()
        .map(|point| validate_point(point, definition))
        .collect()
}

/// Valid points and reported errors for one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileValidation {
    pub valid: Vec<ExpandedPoint>,
    pub errors: Vec<PointError>,
}

/// Validate a file's points and split them into valid points and errors.
pub fn partition_points(
    source_file: &str,
    points: Vec<ExpandedPoint>,
    definition: &Definition,
) -> FileValidation {
    let outcomes = validate_points(&points, definition);
    let mut result = FileValidation::default();
    for (point, outcome) in points.into_iter().zip(outcomes) {
        match PointError::from_outcome(source_file, &point, &outcome) {
            Some(error) => result.errors.push(error),
            None => result.valid.push(point),
        }
    }
    debug!(
        source_file,
        valid_count = result.valid.len(),
        error_count = result.errors.len(),
        "points validated"
    );
    result
}

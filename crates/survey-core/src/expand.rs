//! Combined-point expansion.

use survey_model::{Definition, ExpandedPoint, RawPoint};

/// Split a record that stacks several codes into one point per code.
///
/// A code is combined when it contains the definition's combination separator
/// and every constituent is non-empty. Constituents keep their field order and
/// share the record's id, coordinates and attributes. Anything else, including
/// ill-formed combinations like `TREE+`, becomes a single point with its code
/// untouched so validation can reject it.
pub fn expand_point(raw: &RawPoint, definition: &Definition) -> Vec<ExpandedPoint> {
    let separator = definition.combination_separator();
    if !separator.is_empty() && raw.code.contains(separator) {
        let constituents: Vec<&str> = raw.code.split(separator).map(str::trim).collect();
        if constituents.iter().all(|code| !code.is_empty()) {
            return constituents
                .into_iter()
                .map(|code| ExpandedPoint::from_raw(raw, code))
                .collect();
        }
    }
    vec![ExpandedPoint::from_raw(raw, raw.code.as_str())]
}

/// Expand every record of a file, preserving record order.
pub fn expand_points(raw_points: &[RawPoint], definition: &Definition) -> Vec<ExpandedPoint> {
    raw_points
        .iter()
        .flat_map(|raw| expand_point(raw, definition))
        .collect()
}

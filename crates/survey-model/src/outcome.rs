//! Validation outcomes and the errors reported for invalid points.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::point::ExpandedPoint;

/// Why a point was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidReason {
    /// The code resolves to neither a feature code nor a control code.
    UnknownCode,
}

impl InvalidReason {
    pub fn as_str(self) -> &'static str {
        match self {
            InvalidReason::UnknownCode => "UnknownCode",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point field that caused a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum PointField {
    Code,
}

impl PointField {
    pub fn as_str(self) -> &'static str {
        match self {
            PointField::Code => "code",
        }
    }
}

impl fmt::Display for PointField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    Valid,
    Invalid {
        reason: InvalidReason,
        field: PointField,
        /// Offending value as it appeared on the point.
        value: String,
    },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// An invalid point joined with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointError {
    pub source_file: String,
    pub record: usize,
    pub point_id: String,
    pub field: PointField,
    pub value: String,
    pub reason: InvalidReason,
}

impl PointError {
    /// Build the error for `point`; `None` when `outcome` is valid.
    pub fn from_outcome(
        source_file: &str,
        point: &ExpandedPoint,
        outcome: &ValidationOutcome,
    ) -> Option<Self> {
        match outcome {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid {
                reason,
                field,
                value,
            } => Some(Self {
                source_file: source_file.to_string(),
                record: point.record,
                point_id: point.id.clone(),
                field: *field,
                value: value.clone(),
                reason: *reason,
            }),
        }
    }
}

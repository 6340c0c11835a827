pub mod definition;
pub mod options;
pub mod outcome;
pub mod point;
pub mod summary;

pub use definition::{ControlCodeDefinition, Decoration, Definition, Placement};
pub use options::{ExportMode, RunOptions};
pub use outcome::{InvalidReason, PointError, PointField, ValidationOutcome};
pub use point::{Coordinates, ExpandedPoint, RawPoint, SurveyFile, display_name};
pub use summary::{RunSummary, StatusTier, WriteFailure};

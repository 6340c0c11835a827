//! Survey point processing rules.
//!
//! - **Normalization**: strip control-code decoration from a code
//! - **Expansion**: split combined records into single points
//! - **Validation**: check point codes against the job definition

pub mod codes;
pub mod expand;
pub mod validate;

pub use codes::{normalize_code, resolve_feature_code, strip_control_decoration};
pub use expand::{expand_point, expand_points};
pub use validate::{FileValidation, partition_points, validate_point, validate_points};

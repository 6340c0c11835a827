//! Job vocabulary loading.
//!
//! Builds a [`survey_model::Definition`] from a feature definition (`.fxl`)
//! file. A failure here is fatal to a run: nothing is read or written once the
//! definition cannot be loaded.

mod error;
mod loader;

pub use error::{DefinitionError, Result};
pub use loader::{DefinitionLoader, FxlLoader, FxlOptions, load_definition, parse_definition};

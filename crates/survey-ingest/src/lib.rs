//! Survey point ingestion.
//!
//! Reads field point files into [`survey_model::RawPoint`] records and resolves
//! the list of input files for a run.
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use survey_ingest::{CsvOptions, CsvPointReader, PointReader, collect_input_files};
//!
//! let inputs = collect_input_files(&[PathBuf::from("field/day1")])?;
//! let reader = CsvPointReader::new(&CsvOptions::default())?;
//! let points = reader.read_points(&inputs[0])?;
//! ```

mod discovery;
mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Point Reading ===
pub use reader::{ColumnLayout, CsvOptions, CsvPointReader, PointReader};

// === File Discovery ===
pub use discovery::{collect_input_files, list_csv_files};

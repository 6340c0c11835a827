//! Input file discovery.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Resolve caller-supplied inputs into an ordered list of point files.
///
/// Directories expand to the CSV files they contain. A file reached more than
/// once, under any spelling of its path, is kept at its first position only.
pub fn collect_input_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seen = BTreeSet::new();
    let mut files = Vec::new();
    for input in inputs {
        let expanded = if input.is_dir() {
            list_csv_files(input)?
        } else if input.is_file() {
            vec![input.clone()]
        } else {
            return Err(IngestError::NotFound {
                path: input.clone(),
            });
        };
        for path in expanded {
            let canonical = std::fs::canonicalize(&path)
                .map_err(|source| IngestError::FileRead {
                    path: path.clone(),
                    source,
                })?;
            if seen.insert(canonical) {
                files.push(path);
            }
        }
    }
    Ok(files)
}

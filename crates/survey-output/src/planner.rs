//! Export planning and execution.
//!
//! Planning decides which files a run produces and which points go into each;
//! execution hands every planned output to a [`PointWriter`]. A busy
//! destination only skips its own output. Any other write failure stops the
//! export.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use survey_core::normalize_code;
use survey_model::{Definition, ExpandedPoint, ExportMode, SurveyFile, WriteFailure};

use crate::error::{Result, WriteError};
use crate::writer::PointWriter;

/// One output file a run intends to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    /// Unique within a plan, ignoring ASCII case.
    pub file_name: String,
    /// Indices of the source files whose points go into this output.
    pub sources: BTreeSet<usize>,
    pub points: Vec<ExpandedPoint>,
}

/// Result of executing a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOutcome {
    pub outputs_written: usize,
    pub write_errors: Vec<WriteFailure>,
    /// Source files none of whose outputs could be written.
    pub lost_sources: BTreeSet<usize>,
}

/// Decide the outputs for `files`.
///
/// Per-file mode keeps every file with at least one point under its own name.
/// Group mode pools all points and files them under their normalized feature
/// code; points whose code normalizes to no feature code (control codes alone)
/// are left out, as are feature codes without points. File names that would
/// clash (same base name from different directories, or codes that sanitize or
/// case-fold to the same name) get a numeric suffix.
pub fn plan_exports(
    files: &[SurveyFile],
    definition: &Definition,
    mode: ExportMode,
) -> Vec<PlannedOutput> {
    let mut names = UniqueNames::default();
    match mode {
        ExportMode::PerFile => files
            .iter()
            .enumerate()
            .filter(|(_, file)| file.has_points())
            .map(|(index, file)| PlannedOutput {
                file_name: names.claim(&file.name),
                sources: BTreeSet::from([index]),
                points: file.points.clone(),
            })
            .collect(),
        ExportMode::GroupByCode => {
            let mut groups: BTreeMap<String, (BTreeSet<usize>, Vec<ExpandedPoint>)> =
                BTreeMap::new();
            for (index, file) in files.iter().enumerate() {
                for point in &file.points {
                    let code = normalize_code(&point.code, definition);
                    if definition.is_known_feature_code(&code) {
                        let (sources, points) = groups.entry(code).or_default();
                        sources.insert(index);
                        points.push(point.clone());
                    } else {
                        debug!(code = %point.code, "point has no feature code, not grouped");
                    }
                }
            }
            groups
                .into_iter()
                .map(|(code, (sources, points))| PlannedOutput {
                    file_name: names.claim(&code_file_name(&code)),
                    sources,
                    points,
                })
                .collect()
        }
    }
}

/// File names handed out so far, compared without ASCII case.
#[derive(Debug, Default)]
struct UniqueNames {
    taken: BTreeSet<String>,
}

impl UniqueNames {
    /// `name`, or `{stem}_{n}.{ext}` for the first free `n` from 2.
    fn claim(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_ascii_lowercase()) {
            return name.to_string();
        }
        let (stem, extension) = match name.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
            _ => (name, None),
        };
        let mut n = 2usize;
        loop {
            let candidate = match extension {
                Some(extension) => format!("{stem}_{n}.{extension}"),
                None => format!("{stem}_{n}"),
            };
            if self.taken.insert(candidate.to_ascii_lowercase()) {
                debug!(name, renamed = %candidate, "output name already planned");
                return candidate;
            }
            n += 1;
        }
    }
}

/// `{code}.csv`, with characters that cannot appear in a file name replaced.
pub fn code_file_name(code: &str) -> String {
    let stem: String = code
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{stem}.csv")
}

/// Create the output directory if it does not exist.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| WriteError::new(dir, e))
}

/// Write every planned output into `output_dir`.
///
/// Busy destinations are recorded and skipped; the first other failure is
/// returned. A source file is lost when it fed at least one output and none of
/// its outputs were written.
pub fn export<W: PointWriter + ?Sized>(
    plan: &[PlannedOutput],
    writer: &W,
    output_dir: &Path,
) -> Result<ExportOutcome> {
    let mut outcome = ExportOutcome::default();
    let mut written_sources = BTreeSet::new();
    let mut failed_sources = BTreeSet::new();
    for output in plan {
        let path: PathBuf = output_dir.join(&output.file_name);
        match writer.write_points(&path, &output.points) {
            Ok(()) => {
                outcome.outputs_written += 1;
                written_sources.extend(output.sources.iter().copied());
            }
            Err(error) if error.is_busy() => {
                warn!(path = %path.display(), error = %error, "output is busy, skipped");
                outcome.write_errors.push(WriteFailure {
                    path,
                    message: error.to_string(),
                });
                failed_sources.extend(output.sources.iter().copied());
            }
            Err(error) => return Err(error),
        }
    }
    outcome.lost_sources = failed_sources
        .difference(&written_sources)
        .copied()
        .collect();
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_file_name() {
        assert_eq!(code_file_name("TREE"), "TREE.csv");
        assert_eq!(code_file_name("FENCE/W"), "FENCE_W.csv");
        assert_eq!(code_file_name("A:B"), "A_B.csv");
    }

    #[test]
    fn test_unique_names_suffix_clashes() {
        let mut names = UniqueNames::default();
        assert_eq!(names.claim("pts.csv"), "pts.csv");
        assert_eq!(names.claim("pts.csv"), "pts_2.csv");
        assert_eq!(names.claim("PTS.csv"), "PTS_3.csv");
        assert_eq!(names.claim("pts_2.csv"), "pts_2_2.csv");
        assert_eq!(names.claim("README"), "README");
        assert_eq!(names.claim("readme"), "readme_2");
    }
}

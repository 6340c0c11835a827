//! Survey batch pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Definition**: Load the job's feature and control codes
//! 2. **Ingest**: Resolve the input files
//! 3. **Process**: Read, expand, and validate each file (in parallel)
//! 4. **Export**: Write valid points per file or per feature code
//! 5. **Report**: Write the error report and build the run summary
//!
//! A definition failure stops the run before any input is read. A busy output
//! only skips that output; any other write failure stops the run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{Span, debug, info, info_span};

use survey_core::{FileValidation, expand_points, normalize_code, partition_points};
use survey_fxl::{DefinitionError, DefinitionLoader, FxlLoader};
use survey_ingest::{CsvPointReader, IngestError, PointReader, collect_input_files};
use survey_model::{Definition, RunOptions, RunSummary, SurveyFile, display_name};
use survey_output::{
    CsvPointWriter, PointWriter, WriteError, ensure_output_dir, export, plan_exports,
    write_error_report,
};

use crate::aggregate::RunTally;
use crate::config::SurveyConfig;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Input(#[from] IngestError),

    #[error(transparent)]
    Output(#[from] WriteError),
}

/// Everything a single run needs from its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub definition_path: PathBuf,
    /// Files or directories of files, in processing order.
    pub input_paths: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub options: RunOptions,
}

/// A processed input file and its contribution to the run.
#[derive(Debug)]
struct ProcessedFile {
    file: SurveyFile,
    tally: RunTally,
}

/// The batch pipeline over pluggable definition, point, and output adapters.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<L, R, W> {
    loader: L,
    reader: R,
    writer: W,
}

impl Pipeline<FxlLoader, CsvPointReader, CsvPointWriter> {
    /// FXL definitions, CSV inputs, and CSV outputs configured from `config`.
    pub fn from_config(config: &SurveyConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(
            FxlLoader::new(config.definition.clone()),
            CsvPointReader::new(&config.input)?,
            CsvPointWriter::new(),
        ))
    }
}

impl<L, R, W> Pipeline<L, R, W>
where
    L: DefinitionLoader,
    R: PointReader,
    W: PointWriter,
{
    pub fn new(loader: L, reader: R, writer: W) -> Self {
        Self {
            loader,
            reader,
            writer,
        }
    }

    /// Run every stage and summarize the result.
    pub fn run(&self, request: &RunRequest) -> Result<RunSummary, PipelineError> {
        let run_span = info_span!(
            "run",
            output_dir = %request.output_dir.display(),
            export_mode = ?request.options.export_mode,
            strip_control_codes = request.options.strip_control_codes
        );
        let _run_guard = run_span.enter();
        let run_start = Instant::now();

        // Stage 1: Definition
        let definition = info_span!("definition").in_scope(|| -> Result<_, PipelineError> {
            let start = Instant::now();
            let definition = self.loader.load(&request.definition_path)?;
            info!(
                definition = %request.definition_path.display(),
                feature_codes = definition.feature_codes().len(),
                control_codes = definition.control_codes().len(),
                duration_ms = start.elapsed().as_millis(),
                "definition loaded"
            );
            Ok(definition)
        })?;

        // Stage 2: Ingest
        let inputs = collect_input_files(&request.input_paths)?;
        info!(input_count = inputs.len(), "inputs resolved");

        // Stage 3: Process
        let process_start = Instant::now();
        let processed = process_files(
            &self.reader,
            &inputs,
            &definition,
            request.options,
            &run_span,
        )?;
        let (files, tally) = processed.into_iter().fold(
            (Vec::with_capacity(inputs.len()), RunTally::default()),
            |(mut files, tally), processed| {
                files.push(processed.file);
                (files, tally.merge(processed.tally))
            },
        );
        info!(
            files_with_points = tally.files_succeeded,
            points_failed = tally.point_errors.len(),
            duration_ms = process_start.elapsed().as_millis(),
            "processing complete"
        );

        // Stage 4: Export
        let tally = info_span!("export").in_scope(|| -> Result<_, PipelineError> {
            let start = Instant::now();
            ensure_output_dir(&request.output_dir)?;
            let plan = plan_exports(&files, &definition, request.options.export_mode);
            let outcome = export(&plan, &self.writer, &request.output_dir)?;
            info!(
                planned = plan.len(),
                outputs_written = outcome.outputs_written,
                write_failures = outcome.write_errors.len(),
                duration_ms = start.elapsed().as_millis(),
                "export complete"
            );
            Ok(tally.with_export(outcome))
        })?;

        // Stage 5: Report
        let error_report = if tally.point_errors.is_empty() {
            None
        } else {
            Some(write_error_report(
                &self.writer,
                &request.output_dir,
                &tally.point_errors,
                Local::now().naive_local(),
            )?)
        };

        let summary = tally.into_summary(error_report);
        info!(
            status = %summary.status,
            files_succeeded = summary.files_succeeded,
            outputs_written = summary.outputs_written,
            points_failed = summary.points_failed,
            write_failures = summary.write_failures,
            duration_ms = run_start.elapsed().as_millis(),
            "run complete"
        );
        Ok(summary)
    }
}

/// Read, expand, and validate each input. Results keep input order.
fn process_files<R: PointReader>(
    reader: &R,
    inputs: &[PathBuf],
    definition: &Definition,
    options: RunOptions,
    parent: &Span,
) -> Result<Vec<ProcessedFile>, PipelineError> {
    inputs
        .par_iter()
        .map(|path| {
            let span = info_span!(parent: parent, "process_file", source_file = %path.display());
            span.in_scope(|| process_file(reader, path, definition, options))
        })
        .collect()
}

fn process_file<R: PointReader>(
    reader: &R,
    path: &Path,
    definition: &Definition,
    options: RunOptions,
) -> Result<ProcessedFile, PipelineError> {
    let start = Instant::now();
    let raw_points = reader.read_points(path)?;
    let expanded = expand_points(&raw_points, definition);
    let name = display_name(path);
    let FileValidation { mut valid, errors } = partition_points(&name, expanded, definition);
    if options.strip_control_codes {
        for point in &mut valid {
            point.code = normalize_code(&point.code, definition);
        }
    }
    debug!(
        records = raw_points.len(),
        valid = valid.len(),
        invalid = errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "file processed"
    );
    let tally = RunTally::for_file(!valid.is_empty(), errors);
    Ok(ProcessedFile {
        file: SurveyFile::new(path, valid),
        tally,
    })
}

/// Run the pipeline with FXL definitions and default CSV settings.
pub fn run(
    definition_path: &Path,
    input_paths: &[PathBuf],
    output_dir: &Path,
    group_by_code: bool,
    strip_control_codes: bool,
) -> Result<RunSummary, PipelineError> {
    let pipeline = Pipeline::from_config(&SurveyConfig::default())?;
    pipeline.run(&RunRequest {
        definition_path: definition_path.to_path_buf(),
        input_paths: input_paths.to_vec(),
        output_dir: output_dir.to_path_buf(),
        options: RunOptions::new(group_by_code, strip_control_codes),
    })
}

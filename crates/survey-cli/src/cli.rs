//! CLI argument definitions for the survey batch tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey-batch",
    version,
    about = "Validate and re-export survey point files against a feature definition",
    long_about = "Validate field survey point files against a feature definition (.fxl).\n\n\
                  Combined points are expanded, unknown codes are reported in a\n\
                  timestamped error report, and valid points are exported per input\n\
                  file or grouped by feature code."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate input files and export their valid points.
    Run(RunArgs),

    /// List the feature and control codes of a definition.
    Codes(CodesArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Feature definition file (.fxl).
    #[arg(long = "definition", value_name = "FXL")]
    pub definition: PathBuf,

    /// Directory for exported files and the error report (created if missing).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Write one file per feature code instead of one per input file.
    #[arg(long = "group-by-code")]
    pub group_by_code: bool,

    /// Replace decorated codes with their feature code in exported points.
    #[arg(long = "strip-control-codes")]
    pub strip_control_codes: bool,

    /// TOML file with definition, input, and export settings.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the run summary as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Point files, or directories of .csv files.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CodesArgs {
    /// Feature definition file (.fxl).
    #[arg(long = "definition", value_name = "FXL")]
    pub definition: PathBuf,

    /// TOML file with definition settings.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

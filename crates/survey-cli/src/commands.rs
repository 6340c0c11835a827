use anyhow::{Context, Result};
use comfy_table::Table;

use survey_cli::config::SurveyConfig;
use survey_cli::pipeline::{Pipeline, RunRequest};
use survey_fxl::{DefinitionLoader, FxlLoader};
use survey_model::RunSummary;

use crate::cli::{CodesArgs, RunArgs};
use crate::summary::apply_table_style;

pub fn run_batch(args: &RunArgs) -> Result<RunSummary> {
    let config = SurveyConfig::load_optional(args.config.as_deref())?;
    let pipeline = Pipeline::from_config(&config).context("configure pipeline")?;
    let request = RunRequest {
        definition_path: args.definition.clone(),
        input_paths: args.inputs.clone(),
        output_dir: args.output_dir.clone(),
        options: config.run_options(args.group_by_code, args.strip_control_codes),
    };
    let summary = pipeline.run(&request)?;
    Ok(summary)
}

pub fn run_codes(args: &CodesArgs) -> Result<()> {
    let config = SurveyConfig::load_optional(args.config.as_deref())?;
    let loader = FxlLoader::new(config.definition);
    let definition = loader.load(&args.definition)?;

    let mut table = Table::new();
    table.set_header(vec!["Code", "Kind", "Decoration", "Action"]);
    apply_table_style(&mut table);
    for code in definition.feature_codes() {
        table.add_row(vec![code.as_str(), "feature", "-", "-"]);
    }
    for control in definition.control_codes() {
        let decoration = format!(
            "{} '{}'",
            control.decoration.placement, control.decoration.separator
        );
        table.add_row(vec![
            control.code.clone(),
            "control".to_string(),
            decoration,
            control.action.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");
    println!(
        "Combination separator: '{}'",
        definition.combination_separator()
    );
    Ok(())
}

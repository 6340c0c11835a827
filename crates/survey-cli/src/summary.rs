use std::io::{self, Write};

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survey_model::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    println!("Status: {}", summary.status);
    if let Some(path) = &summary.error_report {
        println!("Error report: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Files succeeded"),
        count_cell(summary.files_succeeded, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Outputs written"),
        count_cell(summary.outputs_written, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Points failed"),
        count_cell(summary.points_failed, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Write failures"),
        count_cell(summary.write_failures, Color::Yellow),
    ]);
    println!("{table}");
    print_write_failures(summary);
    println!();
    println!("{}", summary.message);
}

pub fn write_summary_json<W: Write>(mut out: W, summary: &RunSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, summary)?;
    writeln!(out)?;
    out.flush()
}

fn print_write_failures(summary: &RunSummary) {
    if summary.write_errors.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Output"), header_cell("Error")]);
    apply_table_style(&mut table);
    for failure in &summary.write_errors {
        table.add_row(vec![
            Cell::new(failure.path.display()).fg(Color::Yellow),
            Cell::new(&failure.message),
        ]);
    }
    println!();
    println!("Write failures:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

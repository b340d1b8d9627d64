use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};

use ecom_cli::preview::{
    align_column, apply_table_style, dim_cell, frame_table, header_cell, summary_lines,
};
use ecom_ingest::format_numeric;
use ecom_model::{ImputationAction, ImputationReport};

use crate::types::AnalyzeResult;

pub fn print_summary(result: &AnalyzeResult) {
    let report = &result.report;
    println!("Data: {}", result.data_dir.display());
    for line in summary_lines(&report.summary()) {
        println!("{line}");
    }
    print_imputation_table(&report.imputation);
    for table in report.derived_tables() {
        println!();
        println!(
            "{} ({} rows, showing {})",
            table.title,
            table.data.height(),
            result.preview_rows.min(table.data.height())
        );
        println!("{}", frame_table(table.data, result.preview_rows));
    }
    if let Some(exported) = &result.exported {
        println!();
        println!("Exported:");
        for path in exported.all() {
            println!("- {}", path.display());
        }
    }
}

/// Only columns that were dropped or filled are listed.
fn print_imputation_table(imputation: &ImputationReport) {
    let changed: Vec<_> = imputation
        .columns
        .iter()
        .filter(|entry| entry.action != ImputationAction::Kept)
        .collect();
    if changed.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Missing"),
        header_cell("Fraction"),
        header_cell("Action"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for entry in changed {
        table.add_row(vec![
            Cell::new(&entry.column),
            dim_cell(format!("{:?}", entry.kind).to_lowercase()),
            Cell::new(entry.missing),
            Cell::new(format!("{:.1}%", entry.missing_fraction * 100.0)),
            action_cell(&entry.action),
        ]);
    }
    println!();
    println!("Imputation:");
    println!("{table}");
}

fn action_cell(action: &ImputationAction) -> Cell {
    match action {
        ImputationAction::Kept => dim_cell("kept"),
        ImputationAction::Dropped => Cell::new("dropped")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        ImputationAction::FilledWithMode(mode) => {
            Cell::new(format!("mode: {mode}")).fg(Color::Yellow)
        }
        ImputationAction::FilledWithMedian(median) => {
            Cell::new(format!("median: {}", format_numeric(*median))).fg(Color::Yellow)
        }
    }
}

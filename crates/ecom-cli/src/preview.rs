//! Text rendering of analysis results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use ecom_analysis::impute::classify_column;
use ecom_ingest::{any_to_string, format_numeric};
use ecom_model::{AnalysisSummary, ColumnKind, SpendSegment, SpendThresholds};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// First `rows` rows of `df`. Missing cells render as a dimmed dash.
pub fn frame_table(df: &DataFrame, rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names_str()
            .into_iter()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for idx in 0..rows.min(df.height()) {
        let row: Vec<Cell> = df
            .get_columns()
            .iter()
            .map(|column| match column.get(idx).unwrap_or(AnyValue::Null) {
                AnyValue::Null => dim_cell("-"),
                value => Cell::new(any_to_string(value)),
            })
            .collect();
        table.add_row(row);
    }
    for (index, column) in df.get_columns().iter().enumerate() {
        if classify_column(column.dtype()) == ColumnKind::Numeric {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    table
}

pub fn format_thresholds(thresholds: Option<SpendThresholds>) -> String {
    match thresholds {
        Some(t) => format!("q1={}, q3={}", format_numeric(t.q1), format_numeric(t.q3)),
        None => "none (no payment values)".to_string(),
    }
}

/// Headline lines of a run, without tables.
pub fn summary_lines(summary: &AnalysisSummary) -> Vec<String> {
    let orders = summary.sources.get("orders").map_or(0, |shape| shape.rows);
    let imputation = &summary.imputation;
    let categories = summary
        .top_categories
        .iter()
        .map(|(name, count)| format!("{name} ({count})"))
        .collect::<Vec<_>>()
        .join(", ");
    let segments = SpendSegment::ALL
        .iter()
        .map(|segment| {
            let count = summary.segments.get(segment.label()).copied().unwrap_or(0);
            format!("{segment}={count}")
        })
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        format!("Sources: {} tables, {orders} orders", summary.sources.len()),
        format!(
            "Joined: {} rows x {} columns",
            summary.merged.rows, summary.merged.columns
        ),
        format!(
            "Cleaned: {} rows x {} columns ({} dropped, {} filled, {} cells)",
            summary.cleaned.rows,
            summary.cleaned.columns,
            imputation.dropped_columns().len(),
            imputation.filled_columns().len(),
            imputation.filled_cells()
        ),
        format!(
            "Top categories: {}",
            if categories.is_empty() { "-".to_string() } else { categories }
        ),
        format!("Spend thresholds: {}", format_thresholds(summary.thresholds)),
        format!("Segments: {segments}"),
    ]
}

use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use ecom_analysis::{AnalysisReport, run_analysis};
use ecom_cli::preview::{apply_table_style, header_cell};
use ecom_ingest::load_source_tables;
use ecom_model::{AnalysisOptions, MissingPaymentPolicy, SourceTable};
use ecom_report::{ExportOptions, ExportedFiles, export_report};

use crate::cli::{AnalyzeArgs, MissingPaymentArg};
use crate::types::AnalyzeResult;

pub fn run_datasets() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("File"),
        header_cell("Required columns"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for source in SourceTable::ALL {
        table.add_row(vec![
            source.name().to_string(),
            source.file_name().to_string(),
            source.required_columns().join(", "),
            source.description().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let options = analysis_options(args)?;
    let data_dir = args.data_dir.as_path();
    let run_span = info_span!("analyze", data_dir = %data_dir.display());
    let _run_guard = run_span.enter();

    let tables = info_span!("ingest")
        .in_scope(|| load_source_tables(data_dir))
        .with_context(|| format!("load extracts from {}", data_dir.display()))?;
    let report = run_analysis(&tables, &options).context("analysis failed")?;

    let exported = match &args.output_dir {
        Some(dir) => Some(export(&report, dir, args.include_cleaned)?),
        None => None,
    };
    info!(
        orders = tables.orders.height(),
        cleaned_rows = report.cleaned.height(),
        "analysis complete"
    );

    Ok(AnalyzeResult {
        data_dir: data_dir.to_path_buf(),
        report,
        exported,
        preview_rows: args.preview_rows,
    })
}

fn export(report: &AnalysisReport, dir: &Path, include_cleaned: bool) -> Result<ExportedFiles> {
    let options = ExportOptions::new(dir).with_cleaned(include_cleaned);
    export_report(report, &options).with_context(|| format!("export to {}", dir.display()))
}

fn analysis_options(args: &AnalyzeArgs) -> Result<AnalysisOptions> {
    if !(0.0..=1.0).contains(&args.drop_threshold) {
        bail!(
            "--drop-threshold must be between 0 and 1, got {}",
            args.drop_threshold
        );
    }
    let missing_payment = match args.missing_payment {
        MissingPaymentArg::Unknown => MissingPaymentPolicy::Unknown,
        MissingPaymentArg::Reject => MissingPaymentPolicy::Reject,
    };
    Ok(AnalysisOptions::default()
        .with_drop_threshold(args.drop_threshold)
        .with_top_categories(args.top_categories)
        .with_city_limit(args.city_limit)
        .with_missing_payment(missing_payment))
}

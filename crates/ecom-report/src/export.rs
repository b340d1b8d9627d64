//! Writing a complete [`AnalysisReport`] to disk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use ecom_analysis::AnalysisReport;

use crate::csv::write_table_csv;
use crate::summary::{RunSummary, write_summary_json};

/// File stem of the exported cleaned table.
pub const CLEANED_FILE_STEM: &str = "cleaned";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    /// Also write the cleaned joined table.
    pub include_cleaned: bool,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            include_cleaned: false,
        }
    }

    pub fn with_cleaned(mut self, include: bool) -> Self {
        self.include_cleaned = include;
        self
    }
}

/// Paths written by [`export_report`].
#[derive(Debug, Clone, Default)]
pub struct ExportedFiles {
    pub tables: Vec<PathBuf>,
    pub summary: Option<PathBuf>,
}

impl ExportedFiles {
    pub fn all(&self) -> impl Iterator<Item = &Path> {
        self.tables
            .iter()
            .chain(self.summary.iter())
            .map(PathBuf::as_path)
    }
}

/// Writes every derived table, the optional cleaned table and `summary.json`.
pub fn export_report(report: &AnalysisReport, options: &ExportOptions) -> Result<ExportedFiles> {
    let span = info_span!("export", output_dir = %options.output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let dir = options.output_dir.as_path();
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let mut files = ExportedFiles::default();
    for table in report.derived_tables() {
        let path = write_table_csv(dir, table.name, table.data)?;
        debug!(table = table.name, rows = table.data.height(), path = %path.display(), "table written");
        files.tables.push(path);
    }
    if options.include_cleaned {
        files
            .tables
            .push(write_table_csv(dir, CLEANED_FILE_STEM, &report.cleaned)?);
    }

    let summary = RunSummary::new(report.summary());
    files.summary = Some(write_summary_json(dir, &summary)?);

    info!(
        files = files.tables.len() + 1,
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );
    Ok(files)
}

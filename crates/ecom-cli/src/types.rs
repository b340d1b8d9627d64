use std::path::PathBuf;

use ecom_analysis::AnalysisReport;
use ecom_report::ExportedFiles;

#[derive(Debug)]
pub struct AnalyzeResult {
    pub data_dir: PathBuf,
    pub report: AnalysisReport,
    pub exported: Option<ExportedFiles>,
    pub preview_rows: usize,
}

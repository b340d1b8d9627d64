//! Export of analysis results.
//!
//! - **CSV**: one file per derived table, optionally the cleaned joined table
//! - **JSON**: `summary.json` with source shapes, imputation decisions,
//!   thresholds and segment sizes

mod csv;
mod export;
mod summary;

pub use csv::write_table_csv;
pub use export::{CLEANED_FILE_STEM, ExportOptions, ExportedFiles, export_report};
pub use summary::{SUMMARY_FILE_NAME, RunSummary, write_summary_json};

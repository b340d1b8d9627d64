//! JSON run summary.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use ecom_model::AnalysisSummary;

pub const SUMMARY_FILE_NAME: &str = "summary.json";

/// [`AnalysisSummary`] stamped with its generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// RFC 3339, UTC.
    pub generated_at: String,
    #[serde(flatten)]
    pub analysis: AnalysisSummary,
}

impl RunSummary {
    pub fn new(analysis: AnalysisSummary) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            analysis,
        }
    }
}

pub fn write_summary_json(dir: &Path, summary: &RunSummary) -> Result<PathBuf> {
    let path = dir.join(SUMMARY_FILE_NAME);
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

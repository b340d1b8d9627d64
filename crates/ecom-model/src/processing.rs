//! Serializable summary of a completed analysis run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::imputation::ImputationReport;
use crate::options::AnalysisOptions;
use crate::segment::SpendThresholds;

/// Row/column count of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
}

/// Everything a presentation layer needs besides the derived tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub options: AnalysisOptions,
    /// Shapes of the loaded source tables keyed by table name.
    pub sources: BTreeMap<String, TableShape>,
    pub merged: TableShape,
    pub cleaned: TableShape,
    pub imputation: ImputationReport,
    pub top_categories: Vec<(String, u32)>,
    pub thresholds: Option<SpendThresholds>,
    /// Row count per segment label, including zero counts.
    pub segments: BTreeMap<String, u32>,
}

impl AnalysisSummary {
    pub fn total_segmented(&self) -> u32 {
        self.segments.values().sum()
    }
}

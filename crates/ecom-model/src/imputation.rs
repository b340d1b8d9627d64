//! Column classification and the per-column imputation record.

use serde::{Deserialize, Serialize};

/// How a column is treated by the imputer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Filled with the median.
    Numeric,
    /// Filled with the mode.
    Categorical,
}

/// What the imputer did to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum ImputationAction {
    /// No missing cells.
    Kept,
    /// Missing fraction reached the drop threshold.
    Dropped,
    FilledWithMode(String),
    FilledWithMedian(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnImputation {
    pub column: String,
    pub kind: ColumnKind,
    pub missing: usize,
    pub missing_fraction: f64,
    pub action: ImputationAction,
}

/// Per-column decisions of one imputation pass, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImputationReport {
    pub rows: usize,
    pub columns: Vec<ColumnImputation>,
}

impl ImputationReport {
    pub fn dropped_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|entry| entry.action == ImputationAction::Dropped)
            .map(|entry| entry.column.as_str())
            .collect()
    }

    pub fn filled_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|entry| {
                matches!(
                    entry.action,
                    ImputationAction::FilledWithMode(_) | ImputationAction::FilledWithMedian(_)
                )
            })
            .map(|entry| entry.column.as_str())
            .collect()
    }

    /// Total number of cells that received a value.
    pub fn filled_cells(&self) -> usize {
        self.columns
            .iter()
            .filter(|entry| {
                matches!(
                    entry.action,
                    ImputationAction::FilledWithMode(_) | ImputationAction::FilledWithMedian(_)
                )
            })
            .map(|entry| entry.missing)
            .sum()
    }

    pub fn get(&self, column: &str) -> Option<&ColumnImputation> {
        self.columns.iter().find(|entry| entry.column == column)
    }
}

//! Error types for the analysis stages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A join step references a key the input table does not have.
    #[error("join key '{column}' not found in {table} table")]
    MissingKey { table: String, column: String },

    /// A stage reads a column that is absent (e.g. dropped by imputation).
    #[error("{stage}: column '{column}' not found")]
    MissingColumn { stage: &'static str, column: String },

    /// Raised under the reject policy for an order item without payment value.
    #[error("payment value missing for order-item row {row}")]
    MissingPaymentValue { row: usize },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for AnalysisError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

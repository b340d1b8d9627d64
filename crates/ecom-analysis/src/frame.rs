//! Column access helpers shared by the stages.

use polars::prelude::{DataFrame, Expr, IntoLazy, NULL, col, lit};

use crate::error::{AnalysisError, Result};

/// Internal name of the row-count column produced by group-bys.
pub const TALLY: &str = "__tally";

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

pub fn require_column(df: &DataFrame, name: &str, stage: &'static str) -> Result<()> {
    if has_column(df, name) {
        Ok(())
    } else {
        Err(AnalysisError::MissingColumn {
            stage,
            column: name.to_string(),
        })
    }
}

/// `col(name)` with float NaN read as missing.
pub fn nan_as_null(name: &str) -> Expr {
    col(name).fill_nan(lit(NULL))
}

/// Rewrites NaN cells of every float column as null.
pub fn normalize_missing(df: &DataFrame) -> Result<DataFrame> {
    let floats: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype().is_float())
        .map(|column| nan_as_null(column.name().as_str()))
        .collect();
    if floats.is_empty() {
        return Ok(df.clone());
    }
    Ok(df.clone().lazy().with_columns(floats).collect()?)
}

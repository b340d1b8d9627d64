//! Column-wise missing value imputation.
//!
//! Each column is handled independently in a single left-to-right pass:
//!
//! - missing fraction `>=` the drop threshold: the column is removed;
//! - numeric (integer or float dtype): missing cells take the median of the
//!   observed values and the column is widened to `Float64`;
//! - anything else is categorical: missing cells take the mode, ties going to
//!   the lexicographically smallest value. Non-string categorical columns are
//!   rewritten as strings.
//!
//! Float NaN counts as missing, the same as null.
//!
//! The input is never mutated. Only missing cells are written, so imputing an
//! already imputed table returns it unchanged.

use polars::prelude::{
    DataFrame, DataType, Expr, IntoLazy, SortMultipleOptions, col, len, lit,
};
use tracing::debug;

use ecom_model::{ColumnImputation, ColumnKind, ImputationAction, ImputationReport};

use crate::error::Result;
use crate::frame::{TALLY, normalize_missing};

/// A cleaned table and the per-column decisions that produced it.
#[derive(Debug, Clone)]
pub struct Imputed {
    pub data: DataFrame,
    pub report: ImputationReport,
}

pub fn classify_column(dtype: &DataType) -> ColumnKind {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => ColumnKind::Numeric,
        _ => ColumnKind::Categorical,
    }
}

/// Median of the observed values of `name`, read as `Float64`.
pub fn column_median(df: &DataFrame, name: &str) -> Result<Option<f64>> {
    let median = df
        .select([name])?
        .lazy()
        .select([col(name).cast(DataType::Float64).median()])
        .collect()?;
    Ok(median.column(name)?.f64()?.get(0))
}

/// Most frequent value of `name` read as a string; ties resolve to the
/// smallest value.
pub fn column_mode(df: &DataFrame, name: &str) -> Result<Option<String>> {
    let top = df
        .select([name])?
        .lazy()
        .select([col(name).cast(DataType::String)])
        .filter(col(name).is_not_null())
        .group_by([col(name)])
        .agg([len().alias(TALLY)])
        .sort(
            [TALLY, name],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .limit(1)
        .collect()?;
    Ok(top.column(name)?.str()?.get(0).map(str::to_string))
}

/// Imputes or drops every column of `df`.
///
/// A column with no observed value at all is dropped regardless of the
/// threshold, since there is nothing to fill it from.
pub fn impute_missing(df: &DataFrame, drop_threshold: f64) -> Result<Imputed> {
    let df = normalize_missing(df)?;
    let rows = df.height();
    let mut kept: Vec<Expr> = Vec::with_capacity(df.width());
    let mut decisions = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let name = column.name().to_string();
        let kind = classify_column(column.dtype());
        let missing = column.null_count();
        let missing_fraction = if rows == 0 {
            0.0
        } else {
            missing as f64 / rows as f64
        };

        let action = if missing_fraction >= drop_threshold {
            ImputationAction::Dropped
        } else if missing == 0 {
            kept.push(col(name.as_str()));
            ImputationAction::Kept
        } else {
            match kind {
                ColumnKind::Numeric => match column_median(&df, &name)? {
                    Some(median) => {
                        kept.push(
                            col(name.as_str())
                                .cast(DataType::Float64)
                                .fill_null(lit(median)),
                        );
                        ImputationAction::FilledWithMedian(median)
                    }
                    None => ImputationAction::Dropped,
                },
                ColumnKind::Categorical => match column_mode(&df, &name)? {
                    Some(mode) => {
                        kept.push(
                            col(name.as_str())
                                .cast(DataType::String)
                                .fill_null(lit(mode.clone())),
                        );
                        ImputationAction::FilledWithMode(mode)
                    }
                    None => ImputationAction::Dropped,
                },
            }
        };

        debug!(
            column = %name,
            kind = ?kind,
            missing,
            missing_fraction,
            action = ?action,
            "imputation decision"
        );
        decisions.push(ColumnImputation {
            column: name,
            kind,
            missing,
            missing_fraction,
            action,
        });
    }

    let data = if kept.is_empty() {
        DataFrame::empty()
    } else {
        df.lazy().select(kept).collect()?
    };
    Ok(Imputed {
        data,
        report: ImputationReport {
            rows,
            columns: decisions,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn mode_ties_resolve_to_smallest_value() {
        let df = DataFrame::new(vec![Column::new(
            "city".into(),
            [Some("recife"), Some("belem"), None, Some("recife"), Some("belem")],
        )])
        .unwrap();
        assert_eq!(column_mode(&df, "city").unwrap().as_deref(), Some("belem"));
    }

    #[test]
    fn mode_of_empty_column_is_none() {
        let df = DataFrame::new(vec![
            Column::new("city".into(), [None::<&str>, None])
                .cast(&DataType::String)
                .unwrap(),
        ])
        .unwrap();
        assert_eq!(column_mode(&df, "city").unwrap(), None);
    }

    #[test]
    fn median_interpolates_even_counts() {
        let df = DataFrame::new(vec![Column::new(
            "freight".into(),
            [Some(4_i64), None, Some(1), Some(3), Some(2)],
        )])
        .unwrap();
        assert_eq!(column_median(&df, "freight").unwrap(), Some(2.5));
    }

    #[test]
    fn nan_cells_are_counted_and_filled() {
        let df = DataFrame::new(vec![Column::new(
            "payment_value".into(),
            [Some(1.0), Some(f64::NAN), None, Some(4.0), Some(2.0), Some(3.0)],
        )])
        .unwrap();

        let imputed = impute_missing(&df, 0.5).unwrap();

        let decision = &imputed.report.columns[0];
        assert_eq!(decision.missing, 2);
        assert_eq!(decision.action, ImputationAction::FilledWithMedian(2.5));
        let filled = imputed.data.column("payment_value").unwrap().f64().unwrap();
        assert_eq!(filled.null_count(), 0);
        assert!(filled.into_no_null_iter().all(|value| !value.is_nan()));
        assert_eq!(filled.get(1), Some(2.5));
        assert_eq!(filled.get(2), Some(2.5));
    }

    #[test]
    fn mostly_nan_column_is_dropped() {
        let df = DataFrame::new(vec![
            Column::new("payment_value".into(), [f64::NAN, f64::NAN, 7.0]),
            Column::new("order_id".into(), ["o1", "o2", "o3"]),
        ])
        .unwrap();

        let imputed = impute_missing(&df, 0.5).unwrap();

        assert_eq!(imputed.report.columns[0].action, ImputationAction::Dropped);
        assert_eq!(imputed.data.get_column_names_str(), vec!["order_id"]);
    }

    #[test]
    fn classifies_by_dtype() {
        assert_eq!(classify_column(&DataType::Int64), ColumnKind::Numeric);
        assert_eq!(classify_column(&DataType::Float32), ColumnKind::Numeric);
        assert_eq!(classify_column(&DataType::String), ColumnKind::Categorical);
        assert_eq!(classify_column(&DataType::Boolean), ColumnKind::Categorical);
    }
}

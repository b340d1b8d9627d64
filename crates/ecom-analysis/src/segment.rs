//! Rule-based spend segmentation of the order-items population.
//!
//! Thresholds are the first and third quartile of `payment_value`; every
//! row is compared against both scalars. Rows without a value follow the
//! configured [`MissingPaymentPolicy`].

use std::collections::BTreeMap;

use polars::prelude::{
    DataFrame, DataType, Expr, IntoLazy, NULL, QuantileMethod, col, lit, when,
};

use ecom_model::columns::{
    CLUSTER, CLUSTER_LABEL, CUSTOMER_ID, NUMBER_OF_ORDERS_LABEL, ORDER_ID, PAYMENT_VALUE,
};
use ecom_model::{MissingPaymentPolicy, SpendSegment, SpendThresholds};

use crate::aggregate::value_counts;
use crate::error::{AnalysisError, Result};
use crate::frame::require_column;

const STAGE: &str = "segment";
const ROW: &str = "__row";

/// Clustered rows, their tally and the thresholds used.
#[derive(Debug, Clone)]
pub struct SpendSegmentation {
    /// `order_id`, `customer_id`, `payment_value`, `cluster`.
    pub clustered: DataFrame,
    /// `Cluster` / `Number of Orders`, count descending.
    pub counts: DataFrame,
    pub thresholds: Option<SpendThresholds>,
    /// Rows per segment, every segment present (zero when unused).
    pub tally: BTreeMap<SpendSegment, u32>,
}

/// `payment_value` as `Float64`, NaN read as missing.
fn payment_value() -> Expr {
    col(PAYMENT_VALUE).cast(DataType::Float64).fill_nan(lit(NULL))
}

/// Q1/Q3 of the observed payment values, `None` when nothing was observed.
pub fn spend_thresholds(df: &DataFrame) -> Result<Option<SpendThresholds>> {
    require_column(df, PAYMENT_VALUE, STAGE)?;
    let quartiles = df
        .select([PAYMENT_VALUE])?
        .lazy()
        .select([
            payment_value()
                .quantile(lit(0.25), QuantileMethod::Linear)
                .alias("q1"),
            payment_value()
                .quantile(lit(0.75), QuantileMethod::Linear)
                .alias("q3"),
        ])
        .collect()?;
    let q1 = quartiles.column("q1")?.f64()?.get(0);
    let q3 = quartiles.column("q3")?.f64()?.get(0);
    Ok(q1.zip(q3).map(|(q1, q3)| SpendThresholds::new(q1, q3)))
}

/// Segment label for `value`. Both boundaries belong to `Medium`; a missing
/// value, or no thresholds at all, is `Unknown`.
pub fn segment_expr(value: Expr, thresholds: Option<SpendThresholds>) -> Expr {
    let Some(SpendThresholds { q1, q3 }) = thresholds else {
        return lit(SpendSegment::Unknown.label());
    };
    when(value.clone().is_null())
        .then(lit(SpendSegment::Unknown.label()))
        .when(value.clone().lt(lit(q1)))
        .then(lit(SpendSegment::Low.label()))
        .when(value.gt(lit(q3)))
        .then(lit(SpendSegment::High.label()))
        .otherwise(lit(SpendSegment::Medium.label()))
}

/// Row index of the first row without a payment value.
fn first_missing_row(df: &DataFrame) -> Result<Option<usize>> {
    let missing = df
        .select([PAYMENT_VALUE])?
        .lazy()
        .with_row_index(ROW, None)
        .filter(payment_value().is_null())
        .select([col(ROW).cast(DataType::UInt64)])
        .limit(1)
        .collect()?;
    Ok(missing
        .column(ROW)?
        .u64()?
        .get(0)
        .and_then(|row| usize::try_from(row).ok()))
}

/// Segments the order-items table by `payment_value`.
///
/// Under [`MissingPaymentPolicy::Reject`] the first missing value aborts
/// with its row index.
pub fn segment_order_items(
    order_items: &DataFrame,
    policy: MissingPaymentPolicy,
) -> Result<SpendSegmentation> {
    require_column(order_items, ORDER_ID, STAGE)?;
    require_column(order_items, CUSTOMER_ID, STAGE)?;
    require_column(order_items, PAYMENT_VALUE, STAGE)?;

    if policy == MissingPaymentPolicy::Reject
        && let Some(row) = first_missing_row(order_items)?
    {
        return Err(AnalysisError::MissingPaymentValue { row });
    }

    let thresholds = spend_thresholds(order_items)?;
    let clustered = order_items
        .select([ORDER_ID, CUSTOMER_ID, PAYMENT_VALUE])?
        .lazy()
        .select([
            col(ORDER_ID),
            col(CUSTOMER_ID),
            payment_value().alias(PAYMENT_VALUE),
            segment_expr(payment_value(), thresholds).alias(CLUSTER),
        ])
        .collect()?;

    let counts = value_counts(&clustered, CLUSTER, CLUSTER_LABEL, NUMBER_OF_ORDERS_LABEL)?;

    let mut tally: BTreeMap<SpendSegment, u32> =
        SpendSegment::ALL.into_iter().map(|segment| (segment, 0)).collect();
    let labels = counts.column(CLUSTER_LABEL)?.str()?;
    let rows = counts.column(NUMBER_OF_ORDERS_LABEL)?.u32()?;
    for (label, count) in labels.into_iter().zip(rows) {
        if let (Some(segment), Some(count)) = (label.and_then(SpendSegment::from_label), count) {
            tally.insert(segment, count);
        }
    }

    Ok(SpendSegmentation {
        clustered,
        counts,
        thresholds,
        tally,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;
    use proptest::prelude::*;

    fn order_items(values: &[Option<f64>]) -> DataFrame {
        let ids: Vec<String> = (0..values.len()).map(|i| format!("o{i}")).collect();
        let customers: Vec<String> = (0..values.len()).map(|i| format!("c{i}")).collect();
        DataFrame::new(vec![
            Column::new("order_id".into(), ids),
            Column::new("customer_id".into(), customers),
            Column::new("payment_value".into(), values.to_vec()),
        ])
        .unwrap()
    }

    fn cluster_labels(clustered: &DataFrame) -> Vec<Option<SpendSegment>> {
        clustered
            .column(CLUSTER)
            .unwrap()
            .str()
            .unwrap()
            .iter()
            .map(|label| label.and_then(SpendSegment::from_label))
            .collect()
    }

    fn label_values(values: &[f64], thresholds: SpendThresholds) -> Vec<SpendSegment> {
        let df = DataFrame::new(vec![Column::new("value".into(), values.to_vec())]).unwrap();
        let labelled = df
            .lazy()
            .select([segment_expr(col("value"), Some(thresholds)).alias(CLUSTER)])
            .collect()
            .unwrap();
        cluster_labels(&labelled).into_iter().map(Option::unwrap).collect()
    }

    #[test]
    fn quartiles_split_reference_values() {
        let df = order_items(&[Some(10.0), Some(20.0), Some(30.0), Some(40.0), Some(90.0)]);
        let result = segment_order_items(&df, MissingPaymentPolicy::Unknown).unwrap();

        assert_eq!(result.thresholds, Some(SpendThresholds::new(20.0, 40.0)));
        assert_eq!(
            cluster_labels(&result.clustered),
            vec![
                Some(SpendSegment::Low),
                Some(SpendSegment::Medium),
                Some(SpendSegment::Medium),
                Some(SpendSegment::Medium),
                Some(SpendSegment::High),
            ]
        );
        assert_eq!(result.tally[&SpendSegment::Medium], 3);
        assert_eq!(result.tally[&SpendSegment::Unknown], 0);
        assert_eq!(
            result.clustered.get_column_names_str(),
            vec!["order_id", "customer_id", "payment_value", "cluster"]
        );

        let first = result.counts.column("Cluster").unwrap().str().unwrap().get(0);
        assert_eq!(first, Some("Medium Spend"));
    }

    #[test]
    fn boundaries_are_medium() {
        let thresholds = SpendThresholds::new(20.0, 40.0);
        assert_eq!(
            label_values(&[19.99, 20.0, 40.0, 40.01], thresholds),
            vec![
                SpendSegment::Low,
                SpendSegment::Medium,
                SpendSegment::Medium,
                SpendSegment::High,
            ]
        );
    }

    #[test]
    fn missing_values_are_unknown_by_default() {
        let df = order_items(&[Some(10.0), None, Some(30.0)]);
        let result = segment_order_items(&df, MissingPaymentPolicy::Unknown).unwrap();

        assert_eq!(cluster_labels(&result.clustered)[1], Some(SpendSegment::Unknown));
        assert_eq!(result.tally[&SpendSegment::Unknown], 1);
    }

    #[test]
    fn nan_payment_is_treated_as_missing() {
        let df = order_items(&[Some(10.0), Some(f64::NAN), Some(30.0)]);
        let result = segment_order_items(&df, MissingPaymentPolicy::Unknown).unwrap();

        assert_eq!(result.thresholds, Some(SpendThresholds::new(15.0, 25.0)));
        assert_eq!(cluster_labels(&result.clustered)[1], Some(SpendSegment::Unknown));
        assert!(matches!(
            segment_order_items(&df, MissingPaymentPolicy::Reject),
            Err(AnalysisError::MissingPaymentValue { row: 1 })
        ));
    }

    #[test]
    fn reject_policy_names_first_missing_row() {
        let df = order_items(&[Some(10.0), Some(12.0), None, None]);
        let err = segment_order_items(&df, MissingPaymentPolicy::Reject).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingPaymentValue { row: 2 }));
    }

    #[test]
    fn no_observed_values_means_no_thresholds() {
        let df = order_items(&[None, None]);
        let result = segment_order_items(&df, MissingPaymentPolicy::Unknown).unwrap();
        assert_eq!(result.thresholds, None);
        assert_eq!(result.tally[&SpendSegment::Unknown], 2);
    }

    #[test]
    fn missing_payment_column_is_reported() {
        let df = DataFrame::new(vec![
            Column::new("order_id".into(), ["o1"]),
            Column::new("customer_id".into(), ["c1"]),
        ])
        .unwrap();
        assert!(matches!(
            segment_order_items(&df, MissingPaymentPolicy::Unknown),
            Err(AnalysisError::MissingColumn { stage: "segment", .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn every_observed_value_gets_a_tier(values in prop::collection::vec(0.0f64..10_000.0, 1..60)) {
            let observed: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
            let result = segment_order_items(&order_items(&observed), MissingPaymentPolicy::Reject).unwrap();
            let thresholds = result.thresholds.unwrap();
            prop_assert!(thresholds.q1 <= thresholds.q3);

            let labels = cluster_labels(&result.clustered);
            prop_assert_eq!(labels.len(), values.len());
            for (value, label) in values.iter().zip(labels) {
                match label {
                    Some(SpendSegment::Low) => prop_assert!(*value < thresholds.q1),
                    Some(SpendSegment::High) => prop_assert!(*value > thresholds.q3),
                    Some(SpendSegment::Medium) => {
                        prop_assert!(*value >= thresholds.q1 && *value <= thresholds.q3)
                    }
                    other => prop_assert!(false, "unexpected label {:?}", other),
                }
            }
            prop_assert_eq!(result.tally[&SpendSegment::Unknown], 0);
        }
    }
}

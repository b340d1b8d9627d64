//! Left-join plans that denormalize the source extracts.
//!
//! Every step keeps all rows of the accumulated left table. Output rows follow
//! the left table's order; one-to-many matches follow the right table's order
//! within each left row. Keys are compared as strings and missing keys never
//! match. A right-hand column whose name already exists on the left is
//! suffixed with `_<right table>`.

use polars::prelude::{
    DataFrame, DataType, IntoLazy, JoinArgs, JoinType, SortMultipleOptions, col,
};
use tracing::debug;

use ecom_ingest::SourceTables;
use ecom_model::SourceTable;
use ecom_model::columns::{CUSTOMER_ID, ORDER_ID, PRODUCT_CATEGORY_NAME, PRODUCT_ID, SELLER_ID};

use crate::error::{AnalysisError, Result};
use crate::frame::has_column;

const LEFT_ROW: &str = "__left_row";
const RIGHT_ROW: &str = "__right_row";

/// Name used for the accumulated table in error messages.
const JOINED: &str = "joined";

/// One left join of the accumulated table with a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinStep {
    pub right: SourceTable,
    pub key: &'static str,
}

impl JoinStep {
    pub const fn new(right: SourceTable, key: &'static str) -> Self {
        Self { right, key }
    }
}

/// Orders ⋈ customers ⋈ payments ⋈ items ⋈ reviews ⋈ products ⋈ sellers.
pub const MERGE_PLAN: [JoinStep; 6] = [
    JoinStep::new(SourceTable::Customers, CUSTOMER_ID),
    JoinStep::new(SourceTable::Payments, ORDER_ID),
    JoinStep::new(SourceTable::OrderItems, ORDER_ID),
    JoinStep::new(SourceTable::Reviews, ORDER_ID),
    JoinStep::new(SourceTable::Products, PRODUCT_ID),
    JoinStep::new(SourceTable::Sellers, SELLER_ID),
];

/// Orders ⋈ customers ⋈ payments ⋈ items, the population the segmenter ranks.
pub const ORDER_ITEMS_PLAN: [JoinStep; 3] = [
    JoinStep::new(SourceTable::Customers, CUSTOMER_ID),
    JoinStep::new(SourceTable::Payments, ORDER_ID),
    JoinStep::new(SourceTable::OrderItems, ORDER_ID),
];

fn require_key(df: &DataFrame, table: &str, key: &str) -> Result<()> {
    if has_column(df, key) {
        Ok(())
    } else {
        Err(AnalysisError::MissingKey {
            table: table.to_string(),
            column: key.to_string(),
        })
    }
}

/// Left-joins `right` onto `left` on `key`.
pub fn left_join(
    left: &DataFrame,
    left_name: &str,
    right: &DataFrame,
    right_name: &str,
    key: &str,
) -> Result<DataFrame> {
    require_key(left, left_name, key)?;
    require_key(right, right_name, key)?;

    let left_lf = left
        .clone()
        .lazy()
        .with_row_index(LEFT_ROW, None)
        .with_column(col(key).cast(DataType::String));
    let right_lf = right
        .clone()
        .lazy()
        .with_row_index(RIGHT_ROW, None)
        .with_column(col(key).cast(DataType::String));

    let suffix = format!("_{right_name}");
    let joined = left_lf
        .join(
            right_lf,
            [col(key)],
            [col(key)],
            JoinArgs::new(JoinType::Left).with_suffix(Some(suffix.into())),
        )
        .sort(
            [LEFT_ROW, RIGHT_ROW],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )
        .collect()?;

    let joined = joined.drop(LEFT_ROW)?.drop(RIGHT_ROW)?;
    debug!(
        left = left_name,
        right = right_name,
        key,
        left_rows = left.height(),
        rows = joined.height(),
        columns = joined.width(),
        "left join"
    );
    Ok(joined)
}

/// Folds `steps` over the orders table.
pub fn join_plan(tables: &SourceTables, steps: &[JoinStep]) -> Result<DataFrame> {
    let mut joined = tables.orders.clone();
    let mut left_name = SourceTable::Orders.name();
    for step in steps {
        joined = left_join(
            &joined,
            left_name,
            tables.get(step.right),
            step.right.name(),
            step.key,
        )?;
        left_name = JOINED;
    }
    Ok(joined)
}

/// The fully denormalized table used by imputation and aggregation.
pub fn build_merged_table(tables: &SourceTables) -> Result<DataFrame> {
    join_plan(tables, &MERGE_PLAN)
}

/// The order-items population used by the segmenter.
pub fn build_order_items_table(tables: &SourceTables) -> Result<DataFrame> {
    join_plan(tables, &ORDER_ITEMS_PLAN)
}

/// Adds `product_category_name_english` to the cleaned table.
pub fn attach_category_translation(
    cleaned: &DataFrame,
    translation: &DataFrame,
) -> Result<DataFrame> {
    left_join(
        cleaned,
        "cleaned",
        translation,
        SourceTable::CategoryTranslation.name(),
        PRODUCT_CATEGORY_NAME,
    )
}

//! Frequency counts and group-by tallies over the cleaned table.
//!
//! Rankings group in first-encounter order and sort stably by count
//! descending, so equal counts keep the order in which their values first
//! appear. Grouped tallies are ordered by their key columns. Rows with a
//! missing key never count.

use polars::prelude::{
    Column, DataFrame, DataType, Expr, IdxSize, IntoLazy, JoinArgs, JoinType, LazyFrame,
    SortMultipleOptions, SortOptions, col, len, lit,
};

use ecom_model::columns::{
    COUNT_LABEL, CUSTOMER_CITY, CUSTOMER_STATE, ORDER_COUNT_LABEL, PAYMENT_TYPE,
    PAYMENT_TYPE_LABEL, PRODUCT_CATEGORY_LABEL, PRODUCT_CATEGORY_NAME_ENGLISH,
};

use crate::error::Result;
use crate::frame::{TALLY, require_column};

const STAGE: &str = "aggregate";

/// Keys cast to string with rows missing any of them removed.
fn keyed(df: &DataFrame, keys: &[&str]) -> Result<LazyFrame> {
    for key in keys {
        require_column(df, key, STAGE)?;
    }
    let columns: Vec<Expr> = keys
        .iter()
        .map(|key| col(*key).cast(DataType::String))
        .collect();
    let present = keys
        .iter()
        .map(|key| col(*key).is_not_null())
        .reduce(Expr::and)
        .unwrap_or_else(|| lit(true));
    Ok(df.select(keys.iter().copied())?.lazy().select(columns).filter(present))
}

/// Value counts of `key` renamed to (`label`, `count_label`), count
/// descending with first-encounter tie order.
pub fn value_counts(df: &DataFrame, key: &str, label: &str, count_label: &str) -> Result<DataFrame> {
    let counts = keyed(df, &[key])?
        .group_by_stable([col(key)])
        .agg([len().alias(TALLY)])
        .sort(
            [TALLY],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .select([col(key).alias(label), col(TALLY).alias(count_label)])
        .collect()?;
    Ok(counts)
}

/// Row counts per key tuple, ordered by key, count column last.
pub fn grouped_counts(df: &DataFrame, keys: &[&str], count_label: &str) -> Result<DataFrame> {
    Ok(grouped_lazy(df, keys, count_label)?.collect()?)
}

fn grouped_lazy(df: &DataFrame, keys: &[&str], count_label: &str) -> Result<LazyFrame> {
    let by: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
    Ok(keyed(df, keys)?
        .group_by(by)
        .agg([len().alias(count_label)])
        .sort(
            keys.to_vec(),
            SortMultipleOptions::default().with_maintain_order(true),
        ))
}

/// Keeps the rows of `grouped` whose `key` is one of the values in `allowed`,
/// re-sorted by `keys`.
fn restrict(grouped: LazyFrame, allowed: LazyFrame, key: &str, keys: &[&str]) -> LazyFrame {
    grouped
        .join(
            allowed,
            [col(key)],
            [col(key)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort(
            keys.to_vec(),
            SortMultipleOptions::default().with_maintain_order(true),
        )
}

/// The `top_n` most frequent translated categories.
pub fn rank_categories(df: &DataFrame, top_n: usize) -> Result<Vec<(String, u32)>> {
    let ranking = value_counts(
        df,
        PRODUCT_CATEGORY_NAME_ENGLISH,
        PRODUCT_CATEGORY_LABEL,
        ORDER_COUNT_LABEL,
    )?
    .head(Some(top_n));
    let names = ranking.column(PRODUCT_CATEGORY_LABEL)?.str()?;
    let counts = ranking.column(ORDER_COUNT_LABEL)?.u32()?;
    Ok(names
        .into_iter()
        .zip(counts)
        .filter_map(|(name, count)| Some((name?.to_string(), count?)))
        .collect())
}

/// `Product Category` / `Order Count` table for a ranking.
pub fn category_demand_frame(ranking: &[(String, u32)]) -> Result<DataFrame> {
    let names: Vec<&str> = ranking.iter().map(|(name, _)| name.as_str()).collect();
    let counts: Vec<u32> = ranking.iter().map(|(_, count)| *count).collect();
    Ok(DataFrame::new(vec![
        Column::new(PRODUCT_CATEGORY_LABEL.into(), names),
        Column::new(ORDER_COUNT_LABEL.into(), counts),
    ])?)
}

pub fn category_demand(df: &DataFrame, top_n: usize) -> Result<DataFrame> {
    category_demand_frame(&rank_categories(df, top_n)?)
}

/// Rows per (category, city), restricted to `categories`.
pub fn geo_distribution(df: &DataFrame, categories: &[String]) -> Result<DataFrame> {
    let keys = [PRODUCT_CATEGORY_NAME_ENGLISH, CUSTOMER_CITY];
    let allowed = DataFrame::new(vec![Column::new(
        PRODUCT_CATEGORY_NAME_ENGLISH.into(),
        categories.to_vec(),
    )])?
    .lazy();
    let grouped = grouped_lazy(df, &keys, ORDER_COUNT_LABEL)?;
    Ok(restrict(grouped, allowed, PRODUCT_CATEGORY_NAME_ENGLISH, &keys).collect()?)
}

/// Overall payment method ranking.
pub fn payment_preferences(df: &DataFrame) -> Result<DataFrame> {
    value_counts(df, PAYMENT_TYPE, PAYMENT_TYPE_LABEL, COUNT_LABEL)
}

pub fn payment_by_state(df: &DataFrame) -> Result<DataFrame> {
    grouped_counts(df, &[CUSTOMER_STATE, PAYMENT_TYPE], COUNT_LABEL)
}

/// Payment methods per city for the first `city_limit` cities of the
/// key-ordered tally. Cities are not ranked by volume.
pub fn payment_by_city(df: &DataFrame, city_limit: usize) -> Result<DataFrame> {
    let keys = [CUSTOMER_CITY, PAYMENT_TYPE];
    let grouped = grouped_lazy(df, &keys, COUNT_LABEL)?;
    let cities = grouped
        .clone()
        .select([col(CUSTOMER_CITY).unique().sort(SortOptions::default())])
        .limit(IdxSize::try_from(city_limit).unwrap_or(IdxSize::MAX));
    Ok(restrict(grouped, cities, CUSTOMER_CITY, &keys).collect()?)
}

/// The three payment views.
#[derive(Debug, Clone)]
pub struct PaymentDistribution {
    pub by_type: DataFrame,
    pub by_state: DataFrame,
    pub by_city: DataFrame,
}

pub fn payment_distribution(df: &DataFrame, city_limit: usize) -> Result<PaymentDistribution> {
    Ok(PaymentDistribution {
        by_type: payment_preferences(df)?,
        by_state: payment_by_state(df)?,
        by_city: payment_by_city(df, city_limit)?,
    })
}

//! Analysis stages over the loaded source extracts.
//!
//! The stages run in a fixed order and never mutate their inputs:
//!
//! 1. [`build_merged_table`]: left joins anchored on orders.
//! 2. [`impute_missing`]: drop sparse columns, fill the rest.
//! 3. Aggregations over the cleaned table ([`rank_categories`],
//!    [`geo_distribution`], [`payment_distribution`]).
//! 4. [`segment_order_items`]: quartile-based spend tiers.
//!
//! [`run_analysis`] chains them and returns an [`AnalysisReport`].

pub mod aggregate;
mod error;
mod frame;
pub mod impute;
pub mod join;
mod pipeline;
pub mod segment;

pub use aggregate::{
    PaymentDistribution, category_demand, geo_distribution, grouped_counts, payment_by_city,
    payment_by_state, payment_distribution, payment_preferences, rank_categories, value_counts,
};
pub use error::{AnalysisError, Result};
pub use impute::{Imputed, impute_missing};
pub use join::{
    JoinStep, MERGE_PLAN, ORDER_ITEMS_PLAN, attach_category_translation, build_merged_table,
    build_order_items_table, join_plan, left_join,
};
pub use pipeline::{AnalysisReport, DerivedTable, run_analysis, shape_of};
pub use segment::{SpendSegmentation, segment_expr, segment_order_items, spend_thresholds};

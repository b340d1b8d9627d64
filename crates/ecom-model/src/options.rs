//! Configuration options for an analysis run.

use serde::{Deserialize, Serialize};

/// Default missing fraction at or above which a column is dropped.
pub const DEFAULT_DROP_THRESHOLD: f64 = 0.5;

/// Default number of categories kept by the demand ranking.
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

/// Default number of distinct cities kept in the payment-by-city view.
pub const DEFAULT_CITY_LIMIT: usize = 20;

/// How the segmenter treats rows without a payment value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPaymentPolicy {
    /// Label the row `Unknown`.
    #[default]
    Unknown,
    /// Abort the run.
    Reject,
}

/// Options controlling the imputation, aggregation and segmentation stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Columns whose missing fraction is `>=` this value are dropped.
    pub drop_threshold: f64,

    /// Number of categories reported by the demand ranking.
    pub top_categories: usize,

    /// Number of distinct cities kept in the payment-by-city view.
    ///
    /// Cities are taken in table order, not by volume.
    pub city_limit: usize,

    /// Handling of order items without a payment value.
    pub missing_payment: MissingPaymentPolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            drop_threshold: DEFAULT_DROP_THRESHOLD,
            top_categories: DEFAULT_TOP_CATEGORIES,
            city_limit: DEFAULT_CITY_LIMIT,
            missing_payment: MissingPaymentPolicy::default(),
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drop_threshold(mut self, threshold: f64) -> Self {
        self.drop_threshold = threshold;
        self
    }

    pub fn with_top_categories(mut self, count: usize) -> Self {
        self.top_categories = count;
        self
    }

    pub fn with_city_limit(mut self, limit: usize) -> Self {
        self.city_limit = limit;
        self
    }

    pub fn with_missing_payment(mut self, policy: MissingPaymentPolicy) -> Self {
        self.missing_payment = policy;
        self
    }
}

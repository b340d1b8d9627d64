//! Spending segments and the quartile thresholds that define them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Spending tier assigned to an order-item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpendSegment {
    Low,
    Medium,
    High,
    /// The row has no payment value.
    Unknown,
}

impl SpendSegment {
    pub const ALL: [SpendSegment; 4] = [
        SpendSegment::Low,
        SpendSegment::Medium,
        SpendSegment::High,
        SpendSegment::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpendSegment::Low => "Low Spend",
            SpendSegment::Medium => "Medium Spend",
            SpendSegment::High => "High Spend",
            SpendSegment::Unknown => "Unknown",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|segment| segment.label() == label)
    }
}

impl fmt::Display for SpendSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First and third quartile of the payment values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendThresholds {
    pub q1: f64,
    pub q3: f64,
}

impl SpendThresholds {
    pub fn new(q1: f64, q3: f64) -> Self {
        Self { q1, q3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for segment in SpendSegment::ALL {
            assert_eq!(SpendSegment::from_label(segment.label()), Some(segment));
        }
        assert_eq!(SpendSegment::from_label("Big Spend"), None);
    }

    #[test]
    fn segments_order_by_tier() {
        let mut segments = vec![
            SpendSegment::Unknown,
            SpendSegment::High,
            SpendSegment::Low,
            SpendSegment::Medium,
        ];
        segments.sort();
        assert_eq!(segments, SpendSegment::ALL.to_vec());
        assert_eq!(SpendSegment::High.to_string(), "High Spend");
    }
}

//! CLI library components for the e-commerce analysis.

pub mod logging;
pub mod preview;

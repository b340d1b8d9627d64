//! Rendering of derived tables and run headlines.

use polars::prelude::{Column, DataFrame};

use ecom_cli::logging::{LogConfig, LogFormat};
use ecom_cli::preview::{format_thresholds, frame_table};
use ecom_model::SpendThresholds;

#[test]
fn missing_cells_render_as_dash() {
    let df = DataFrame::new(vec![
        Column::new("order_id".into(), ["o1", "o2"]),
        Column::new("payment_value".into(), [Some(141.9), None]),
    ])
    .unwrap();

    let rendered = frame_table(&df, 10).to_string();

    assert!(rendered.contains("order_id"));
    assert!(rendered.contains("141.9"));
    assert!(rendered.contains('-'));
}

#[test]
fn empty_frame_renders_header_only() {
    let df = DataFrame::new(vec![Column::new("Cluster".into(), Vec::<String>::new())]).unwrap();
    let table = frame_table(&df, 5);
    assert_eq!(table.row_iter().count(), 0);
    assert!(table.to_string().contains("Cluster"));
}

#[test]
fn thresholds_line() {
    insta::assert_snapshot!(
        format_thresholds(Some(SpendThresholds::new(56.25, 171.5))),
        @"q1=56.25, q3=171.5"
    );
}

#[test]
fn log_config_builders() {
    let config = LogConfig::from_verbosity(2)
        .with_format(LogFormat::Json)
        .with_ansi(false);
    assert_eq!(config.format, LogFormat::Json);
    assert!(!config.with_ansi);
    assert!(config.use_env_filter);
}

//! Source extract ingestion.
//!
//! Locates the fixed set of e-commerce CSV extracts in a data directory,
//! verifies their required columns and loads them into Polars DataFrames.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ecom_ingest::load_source_tables;
//!
//! let tables = load_source_tables(Path::new("data"))?;
//! println!("{} orders", tables.orders.height());
//! ```

mod csv;
mod discovery;
mod error;
mod loader;
mod polars_utils;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{check_required_columns, read_csv_header, read_csv_table};

// === File Discovery ===
pub use discovery::{list_csv_files, locate_source_files};

// === Loading ===
pub use loader::{SourceTables, load_source_tables};

// === Value Formatting ===
pub use polars_utils::{any_to_string, format_numeric};

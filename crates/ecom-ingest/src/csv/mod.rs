//! CSV reading utilities.

mod reader;

pub use reader::{check_required_columns, read_csv_header, read_csv_table};

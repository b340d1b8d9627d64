//! CSV output for derived tables.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

/// Writes `df` as `<dir>/<stem>.csv` with a header row.
pub fn write_table_csv(dir: &Path, stem: &str, df: &DataFrame) -> Result<PathBuf> {
    let path = dir.join(format!("{stem}.csv"));
    let mut file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    let mut data = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut data)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

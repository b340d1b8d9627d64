//! Loading the complete set of source extracts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, info};

use ecom_model::{SourceTable, TableShape};

use crate::csv::{check_required_columns, read_csv_header, read_csv_table};
use crate::discovery::locate_source_files;
use crate::error::{IngestError, Result};

/// The in-memory source tables of one run.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub orders: DataFrame,
    pub customers: DataFrame,
    pub payments: DataFrame,
    pub order_items: DataFrame,
    pub reviews: DataFrame,
    pub products: DataFrame,
    pub sellers: DataFrame,
    pub category_translation: DataFrame,
}

impl SourceTables {
    pub fn get(&self, table: SourceTable) -> &DataFrame {
        match table {
            SourceTable::Orders => &self.orders,
            SourceTable::Customers => &self.customers,
            SourceTable::Payments => &self.payments,
            SourceTable::OrderItems => &self.order_items,
            SourceTable::Reviews => &self.reviews,
            SourceTable::Products => &self.products,
            SourceTable::Sellers => &self.sellers,
            SourceTable::CategoryTranslation => &self.category_translation,
        }
    }

    /// Shape of every table keyed by table name.
    pub fn shapes(&self) -> BTreeMap<String, TableShape> {
        SourceTable::ALL
            .into_iter()
            .map(|table| {
                let df = self.get(table);
                (
                    table.name().to_string(),
                    TableShape {
                        rows: df.height(),
                        columns: df.width(),
                    },
                )
            })
            .collect()
    }
}

fn source_path(
    files: &BTreeMap<SourceTable, PathBuf>,
    dir: &Path,
    table: SourceTable,
) -> Result<PathBuf> {
    files
        .get(&table)
        .cloned()
        .ok_or_else(|| IngestError::FileNotFound {
            table: table.name().to_string(),
            path: dir.join(table.file_name()),
        })
}

/// Loads all source extracts from `dir`.
///
/// Every header is checked before any table is loaded, so a missing file or
/// column aborts the run without reading the large extracts.
pub fn load_source_tables(dir: &Path) -> Result<SourceTables> {
    let files = locate_source_files(dir)?;

    for table in SourceTable::ALL {
        let path = source_path(&files, dir, table)?;
        let headers = read_csv_header(&path)?;
        check_required_columns(table, &headers, &path)?;
        debug!(table = %table, columns = headers.len(), "header verified");
    }

    let load = |table: SourceTable| -> Result<DataFrame> {
        let path = source_path(&files, dir, table)?;
        let start = Instant::now();
        let df = read_csv_table(&path)?;
        info!(
            table = %table,
            rows = df.height(),
            columns = df.width(),
            duration_ms = start.elapsed().as_millis(),
            "table loaded"
        );
        Ok(df)
    };

    Ok(SourceTables {
        orders: load(SourceTable::Orders)?,
        customers: load(SourceTable::Customers)?,
        payments: load(SourceTable::Payments)?,
        order_items: load(SourceTable::OrderItems)?,
        reviews: load(SourceTable::Reviews)?,
        products: load(SourceTable::Products)?,
        sellers: load(SourceTable::Sellers)?,
        category_translation: load(SourceTable::CategoryTranslation)?,
    })
}

//! CSV header probing and full loads into Polars.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use ecom_model::SourceTable;

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads only the header row of a CSV file.
///
/// Used to reject extracts with missing columns before paying for a full load.
pub fn read_csv_header(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::HeaderRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let headers = reader.headers().map_err(|e| IngestError::HeaderRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let columns: Vec<String> = headers.iter().map(normalize_header).collect();
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(columns)
}

/// Fails with [`IngestError::MissingColumn`] for the first required column of
/// `table` that is not in `headers`.
pub fn check_required_columns(table: SourceTable, headers: &[String], path: &Path) -> Result<()> {
    for column in table.required_columns() {
        if !headers.iter().any(|header| header == column) {
            return Err(IngestError::MissingColumn {
                table: table.name().to_string(),
                column: (*column).to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Reads a CSV file with a single header row into a Polars DataFrame.
///
/// Dtypes are inferred from every row, so a decimal first appearing deep in
/// an integer-looking column widens it to float instead of failing the load.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_header() {
        let file = create_temp_csv("order_id,customer_id\no1,c1\n");
        let headers = read_csv_header(file.path()).unwrap();
        assert_eq!(headers, vec!["order_id", "customer_id"]);
    }

    #[test]
    fn test_read_csv_header_with_bom() {
        let file = create_temp_csv("\u{feff}order_id,customer_id\no1,c1\n");
        let headers = read_csv_header(file.path()).unwrap();
        assert_eq!(headers[0], "order_id");
    }

    #[test]
    fn test_read_csv_header_empty_file() {
        let file = create_temp_csv("");
        let result = read_csv_header(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_check_required_columns_reports_first_missing() {
        let headers = vec!["order_id".to_string(), "order_status".to_string()];
        let err = check_required_columns(SourceTable::Orders, &headers, Path::new("o.csv"))
            .unwrap_err();
        match err {
            IngestError::MissingColumn { table, column, .. } => {
                assert_eq!(table, "orders");
                assert_eq!(column, "customer_id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_csv_table_infers_types() {
        let file = create_temp_csv("order_id,payment_value\no1,10.5\no2,\no3,7\n");
        let df = read_csv_table(file.path()).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 2);
        let values = df.column("payment_value").unwrap();
        assert_eq!(values.null_count(), 1);
        assert!(values.dtype().is_float());
    }

    #[test]
    fn test_read_csv_table_widens_late_decimal() {
        let mut content = String::from("order_id,freight_value\n");
        for row in 0..10_050 {
            content.push_str(&format!("o{row},{}\n", row % 90));
        }
        content.push_str("o_last,250.5\n");
        let file = create_temp_csv(&content);

        let df = read_csv_table(file.path()).unwrap();

        assert_eq!(df.height(), 10_051);
        let freight = df.column("freight_value").unwrap();
        assert!(freight.dtype().is_float());
        assert_eq!(freight.f64().unwrap().get(10_050), Some(250.5));
    }
}

//! Locating the source extracts inside a data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ecom_model::SourceTable;

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Maps every source table to its file in `dir`.
///
/// File names are matched case-insensitively; unrelated CSV files are ignored.
/// The first table without a file yields [`IngestError::FileNotFound`].
pub fn locate_source_files(dir: &Path) -> Result<BTreeMap<SourceTable, PathBuf>> {
    let mut located = BTreeMap::new();
    for path in list_csv_files(dir)? {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(table) = SourceTable::from_file_name(name) {
            located.entry(table).or_insert(path);
        }
    }

    for table in SourceTable::ALL {
        if !located.contains_key(&table) {
            return Err(IngestError::FileNotFound {
                table: table.name().to_string(),
                path: dir.join(table.file_name()),
            });
        }
    }
    Ok(located)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_all_extracts(dir: &Path) {
        for table in SourceTable::ALL {
            std::fs::write(dir.join(table.file_name()), "header\n").unwrap();
        }
    }

    #[test]
    fn test_list_csv_files_sorted() {
        let dir = TempDir::new().unwrap();
        for name in &["b.csv", "a.CSV", "notes.txt"] {
            std::fs::write(dir.path().join(name), "x\n").unwrap();
        }
        let files = list_csv_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn test_list_csv_files_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("test.csv");
        std::fs::write(&file_path, "data").unwrap();
        let result = list_csv_files(&file_path);
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_locate_source_files_finds_every_table() {
        let dir = TempDir::new().unwrap();
        write_all_extracts(dir.path());
        std::fs::write(dir.path().join("geolocation_dataset.csv"), "x\n").unwrap();
        let located = locate_source_files(dir.path()).unwrap();
        assert_eq!(located.len(), SourceTable::ALL.len());
    }

    #[test]
    fn test_locate_source_files_reports_missing_table() {
        let dir = TempDir::new().unwrap();
        write_all_extracts(dir.path());
        std::fs::remove_file(dir.path().join(SourceTable::Sellers.file_name())).unwrap();
        let err = locate_source_files(dir.path()).unwrap_err();
        match err {
            IngestError::FileNotFound { table, .. } => assert_eq!(table, "sellers"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

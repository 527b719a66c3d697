//! Spreadsheet input
//!
//! The batch driver takes its folder list from a CSV or XLSX file. Either
//! way the result is the same shape: a header row naming the substitution
//! columns, then one row per folder with the folder name in the first
//! column. Cells are carried as text; numeric and boolean XLSX cells are
//! rendered, not interpreted.

use crate::error::{CliError, Result};
use calamine::{open_workbook, DataType, Reader, Xlsx};
use std::path::Path;

/// A parsed spreadsheet: one header row plus zero or more data rows
#[derive(Debug, Clone)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Load a spreadsheet, dispatching on the file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => read_csv(path),
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => read_xlsx(path),
            _ => Err(CliError::invalid_tabular(format!(
                "'{}' is neither a .csv nor an .xlsx file",
                path.display()
            ))),
        }
    }
}

fn read_csv(path: &Path) -> Result<Sheet> {
    // Rows may legitimately be longer than the header, so stay flexible and
    // let the row binder enforce the minimum width per row.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => {
            return Err(CliError::invalid_tabular(format!(
                "'{}' has no header row",
                path.display()
            )))
        },
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Sheet { headers, rows })
}

fn read_xlsx(path: &Path) -> Result<Sheet> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        CliError::invalid_tabular(format!("failed to open '{}': {}", path.display(), e))
    })?;

    // Only the first worksheet drives the batch.
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| {
            CliError::invalid_tabular(format!("'{}' contains no worksheets", path.display()))
        })?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| {
            CliError::invalid_tabular(format!("worksheet '{}' is missing", sheet_name))
        })?
        .map_err(|e| {
            CliError::invalid_tabular(format!("failed to read worksheet '{}': {}", sheet_name, e))
        })?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(row) => row.iter().map(render_cell).collect(),
        None => {
            return Err(CliError::invalid_tabular(format!(
                "'{}' has no header row",
                path.display()
            )))
        },
    };

    let rows = rows_iter
        .map(|row| row.iter().map(render_cell).collect())
        .collect();

    Ok(Sheet { headers, rows })
}

/// Render an XLSX cell as the text a CSV would have carried
fn render_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Float(v) => format!("{}", v),
        DataType::Int(v) => format!("{}", v),
        DataType::Bool(b) => format!("{}", b),
        DataType::Error(e) => format!("#{:?}", e),
        DataType::Empty => String::new(),
        DataType::DateTime(v) => format!("{}", v),
        DataType::DateTimeIso(s) => s.clone(),
        DataType::Duration(v) => format!("{}", v),
        DataType::DurationIso(s) => s.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use std::fs;

    #[test]
    fn test_load_csv_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folders.csv");
        fs::write(&path, "Folder,Year\nbox-01,1950\nbox-02,1951\n").unwrap();

        let sheet = Sheet::load(&path).unwrap();
        assert_eq!(sheet.headers, vec!["Folder", "Year"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0], vec!["box-01", "1950"]);
        assert_eq!(sheet.rows[1], vec!["box-02", "1951"]);
    }

    #[test]
    fn test_load_csv_with_quoted_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folders.csv");
        fs::write(&path, "Folder,Description\nbox-01,\"letters, 1950\"\n").unwrap();

        let sheet = Sheet::load(&path).unwrap();
        assert_eq!(sheet.rows[0][1], "letters, 1950");
    }

    #[test]
    fn test_load_csv_keeps_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folders.csv");
        fs::write(&path, "Folder,Year\nbox-01\nbox-02,1951,extra\n").unwrap();

        let sheet = Sheet::load(&path).unwrap();
        assert_eq!(sheet.rows[0], vec!["box-01"]);
        assert_eq!(sheet.rows[1], vec!["box-02", "1951", "extra"]);
    }

    #[test]
    fn test_load_empty_csv_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folders.csv");
        fs::write(&path, "").unwrap();

        let err = Sheet::load(&path).unwrap_err();
        assert!(matches!(err, CliError::InvalidTabular(_)));
    }

    #[test]
    fn test_load_header_only_csv_gives_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folders.csv");
        fs::write(&path, "Folder,Year\n").unwrap();

        let sheet = Sheet::load(&path).unwrap();
        assert_eq!(sheet.headers, vec!["Folder", "Year"]);
        assert!(sheet.rows.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Sheet::load(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_load_unsupported_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folders.ods");
        fs::write(&path, "not a spreadsheet").unwrap();

        let err = Sheet::load(&path).unwrap_err();
        assert!(err.to_string().contains("neither a .csv nor an .xlsx"));
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folders.CSV");
        fs::write(&path, "Folder\nbox-01\n").unwrap();

        let sheet = Sheet::load(&path).unwrap();
        assert_eq!(sheet.rows.len(), 1);
    }

    #[test]
    fn test_render_cell_variants() {
        assert_eq!(render_cell(&DataType::String("box-01".to_string())), "box-01");
        assert_eq!(render_cell(&DataType::Float(1950.0)), "1950");
        assert_eq!(render_cell(&DataType::Float(19.5)), "19.5");
        assert_eq!(render_cell(&DataType::Int(7)), "7");
        assert_eq!(render_cell(&DataType::Bool(true)), "true");
        assert_eq!(render_cell(&DataType::Empty), "");
    }

    #[test]
    fn test_render_error_cells_keep_their_code() {
        assert_eq!(render_cell(&DataType::Error(CellErrorType::Div0)), "#Div0");
        assert_eq!(render_cell(&DataType::Error(CellErrorType::Ref)), "#Ref");
        assert_eq!(render_cell(&DataType::Error(CellErrorType::NA)), "#Na");
    }
}

//! Run ledger of assigned identifiers
//!
//! Every successfully bagged folder gets a `folder,identifier` line appended
//! to `UUIDs.csv` in the target directory. The file is opened in append mode
//! per entry and never rewritten, so ledgers accumulate across runs and a
//! failed row later in a batch cannot take earlier entries with it.

use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;

/// Ledger file name, created in the target directory
pub const LEDGER_FILE: &str = "UUIDs.csv";

/// Append one `folder,identifier` entry to the target directory's ledger
pub fn append_entry(target_dir: impl AsRef<Path>, folder: &str, identifier: &str) -> Result<()> {
    let path = target_dir.as_ref().join(LEDGER_FILE);
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record([folder, identifier])?;
    writer.flush()?;
    Ok(())
}

/// Read back every `(folder, identifier)` entry in a target directory's ledger
pub fn read_entries(target_dir: impl AsRef<Path>) -> Result<Vec<(String, String)>> {
    let path = target_dir.as_ref().join(LEDGER_FILE);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let folder = record.get(0).unwrap_or_default().to_string();
        let identifier = record.get(1).unwrap_or_default().to_string();
        entries.push((folder, identifier));
    }
    Ok(entries)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_append_creates_ledger() {
        let dir = tempfile::tempdir().unwrap();
        append_entry(dir.path(), "box-01", "id-1").unwrap();

        let contents = fs::read_to_string(dir.path().join("UUIDs.csv")).unwrap();
        assert_eq!(contents, "box-01,id-1\n");
    }

    #[test]
    fn test_append_accumulates_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        append_entry(dir.path(), "box-01", "id-1").unwrap();
        append_entry(dir.path(), "box-02", "id-2").unwrap();
        append_entry(dir.path(), "box-01", "id-3").unwrap();

        let entries = read_entries(dir.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                ("box-01".to_string(), "id-1".to_string()),
                ("box-02".to_string(), "id-2".to_string()),
                ("box-01".to_string(), "id-3".to_string()),
            ]
        );
    }

    #[test]
    fn test_folder_names_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        append_entry(dir.path(), "letters, 1950", "id-1").unwrap();

        let contents = fs::read_to_string(dir.path().join("UUIDs.csv")).unwrap();
        assert_eq!(contents, "\"letters, 1950\",id-1\n");

        let entries = read_entries(dir.path()).unwrap();
        assert_eq!(entries[0].0, "letters, 1950");
    }

    #[test]
    fn test_read_missing_ledger_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_entries(dir.path()).is_err());
    }
}

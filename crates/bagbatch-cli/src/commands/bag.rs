//! `bagbatch bag` command implementation
//!
//! Bags every folder listed in a spreadsheet. The metadata template is
//! parsed once; each row fills its placeholders, gets an identifier and a
//! measured size, and is written into its folder as a bag. Rows fail
//! independently: one bad folder never stops the rest of the batch.

use crate::bag;
use crate::baginfo::BagInfo;
use crate::error::{CliError, Result};
use crate::fields;
use crate::ledger;
use crate::progress;
use crate::size;
use crate::substitution::{self, RowBinding};
use crate::tabular::Sheet;
use crate::template;
use bagbatch_common::checksum::ChecksumAlgorithm;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Bag the folders named by the spreadsheet into the target directory
pub async fn run(directory: String, baginfo: String, table: String, verbose: bool) -> Result<()> {
    let target_dir = PathBuf::from(&directory);
    if !target_dir.is_dir() {
        return Err(CliError::DirectoryNotFound(directory));
    }
    let template_path = PathBuf::from(&baginfo);
    if !template_path.is_file() {
        return Err(CliError::FileNotFound(baginfo));
    }

    let base = template::load(&template_path)?;
    let sheet = Sheet::load(&table)?;

    if sheet.rows.is_empty() {
        println!("No folders to bag: the spreadsheet only has a header row.");
        return Ok(());
    }

    info!(
        folders = sheet.rows.len(),
        target = %target_dir.display(),
        "Starting bagging batch"
    );
    println!(
        "{} Bagging {} folder(s) under '{}'",
        "→".cyan(),
        sheet.rows.len(),
        target_dir.display()
    );

    let mut bagged = 0usize;
    let mut failed = 0usize;
    let mut total_bytes = 0u64;

    for (index, cells) in sheet.rows.iter().enumerate() {
        // Spreadsheet rows are 1-based and row 1 is the header.
        let row_number = index + 2;
        match bag_one(&target_dir, &base, &sheet.headers, cells, row_number, verbose) {
            Ok(bytes) => {
                bagged += 1;
                total_bytes += bytes;
            },
            Err(e) => {
                failed += 1;
                error!(row = row_number, error = %e, "Row failed");
                eprintln!("{} row {}: {}", "✗".red(), row_number, e);
            },
        }
    }

    println!();
    if failed == 0 {
        println!(
            "{} {} folder(s) bagged, {} of payload processed",
            "✓".green().bold(),
            bagged,
            progress::format_bytes(total_bytes)
        );
        Ok(())
    } else {
        println!("{} {} bagged, {} failed", "!".yellow().bold(), bagged, failed);
        Err(CliError::Batch {
            failed,
            total: sheet.rows.len(),
        })
    }
}

/// Process a single spreadsheet row, returning the payload bytes bagged
fn bag_one(
    target_dir: &Path,
    base: &BagInfo,
    headers: &[String],
    cells: &[String],
    row_number: usize,
    verbose: bool,
) -> Result<u64> {
    let binding = RowBinding::bind(headers, cells)?;
    let folder_name = cells.first().map(String::as_str).unwrap_or_default();
    if folder_name.is_empty() {
        return Err(CliError::EmptyFolderName(row_number));
    }
    let bag_path = target_dir.join(folder_name);
    if !bag_path.is_dir() {
        return Err(CliError::DirectoryNotFound(bag_path.display().to_string()));
    }

    let mut record = substitution::resolve(base, &binding);
    let identifier = record.assign_identifier();
    let payload_bytes = size::annotate(&mut record, &bag_path)?;

    println!("{} Bagging: {}", "→".cyan(), folder_name);
    if verbose {
        for (label, value) in record.iter() {
            println!("    {}: {}", label, value);
        }
    }

    let spinner = progress::create_spinner(&format!("Writing bag for '{}'", folder_name));
    let outcome = bag::make_bag(&bag_path, &record, ChecksumAlgorithm::Sha256);
    spinner.finish_and_clear();
    outcome?;

    // The ledger entry is only written once the bag is on disk, so the
    // ledger never names a bag that does not exist.
    ledger::append_entry(target_dir, folder_name, &identifier)?;
    debug!(folder = folder_name, identifier = %identifier, "Ledger entry written");

    println!(
        "{} {} ({})",
        "✓".green(),
        folder_name,
        record.get(fields::BAG_SIZE).unwrap_or_default()
    );
    Ok(payload_bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use uuid::Uuid;

    fn write_template(dir: &Path) -> PathBuf {
        let path = dir.join("baginfo.txt");
        fs::write(
            &path,
            "Source-Organization: Example University\n\
             External-Description: Records of [[Office]], [[Year]]\n\
             External-Identifier: coll-001\n",
        )
        .unwrap();
        path
    }

    fn make_folder(dir: &Path, name: &str) {
        let folder = dir.join(name);
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("item.txt"), b"payload").unwrap();
    }

    #[tokio::test]
    async fn test_run_bags_every_listed_folder() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        make_folder(dir.path(), "box-01");
        make_folder(dir.path(), "box-02");

        let table = dir.path().join("folders.csv");
        fs::write(
            &table,
            "Folder,Office,Year\nbox-01,Registrar,1950\nbox-02,Bursar,1951\n",
        )
        .unwrap();

        run(
            dir.path().display().to_string(),
            template.display().to_string(),
            table.display().to_string(),
            false,
        )
        .await
        .unwrap();

        for name in ["box-01", "box-02"] {
            let folder = dir.path().join(name);
            assert!(folder.join("bagit.txt").is_file(), "{} not bagged", name);
            assert!(folder.join("data").join("item.txt").is_file());
        }

        let info = fs::read_to_string(dir.path().join("box-01").join("bag-info.txt")).unwrap();
        assert!(info.contains("External-Description: Records of Registrar, 1950\n"));
        assert!(info.contains("Bag-Size: "));

        let entries = ledger::read_entries(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "box-01");
        assert_eq!(entries[1].0, "box-02");
        assert!(Uuid::parse_str(&entries[0].1).is_ok());
        assert_ne!(entries[0].1, entries[1].1);
    }

    #[tokio::test]
    async fn test_identifier_lands_in_bag_info_and_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        make_folder(dir.path(), "box-01");

        let table = dir.path().join("folders.csv");
        fs::write(&table, "Folder,Office,Year\nbox-01,Registrar,1950\n").unwrap();

        run(
            dir.path().display().to_string(),
            template.display().to_string(),
            table.display().to_string(),
            false,
        )
        .await
        .unwrap();

        let entries = ledger::read_entries(dir.path()).unwrap();
        let identifier = &entries[0].1;

        let info = fs::read_to_string(dir.path().join("box-01").join("bag-info.txt")).unwrap();
        assert!(info.contains(&format!("External-Identifier: {} | coll-001\n", identifier)));
    }

    #[tokio::test]
    async fn test_folder_listed_twice_is_bagged_twice() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        make_folder(dir.path(), "box-01");

        let table = dir.path().join("folders.csv");
        fs::write(
            &table,
            "Folder,Office,Year\nbox-01,Registrar,1950\nbox-01,Registrar,1950\n",
        )
        .unwrap();

        run(
            dir.path().display().to_string(),
            template.display().to_string(),
            table.display().to_string(),
            false,
        )
        .await
        .unwrap();

        // Second pass bags the bag, nesting the first one under data/
        let folder = dir.path().join("box-01");
        assert!(folder.join("data").join("bagit.txt").is_file());

        let entries = ledger::read_entries(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "box-01");
        assert_eq!(entries[1].0, "box-01");
        assert_ne!(entries[0].1, entries[1].1);
    }

    #[tokio::test]
    async fn test_failing_row_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        make_folder(dir.path(), "box-02");

        let table = dir.path().join("folders.csv");
        fs::write(
            &table,
            "Folder,Office,Year\nmissing-box,Registrar,1950\nbox-02,Bursar,1951\n",
        )
        .unwrap();

        let err = run(
            dir.path().display().to_string(),
            template.display().to_string(),
            table.display().to_string(),
            false,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::Batch { failed: 1, total: 2 }));
        assert!(dir.path().join("box-02").join("bagit.txt").is_file());

        // Only the successful folder reached the ledger
        let entries = ledger::read_entries(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "box-02");
    }

    #[tokio::test]
    async fn test_short_row_fails_without_touching_the_folder() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        make_folder(dir.path(), "box-01");

        let table = dir.path().join("folders.csv");
        fs::write(&table, "Folder,Office,Year\nbox-01,Registrar\n").unwrap();

        let err = run(
            dir.path().display().to_string(),
            template.display().to_string(),
            table.display().to_string(),
            false,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::Batch { failed: 1, total: 1 }));
        assert!(!dir.path().join("box-01").join("bagit.txt").exists());
        assert!(dir.path().join("box-01").join("item.txt").is_file());
    }

    #[tokio::test]
    async fn test_row_with_blank_folder_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());

        let table = dir.path().join("folders.csv");
        fs::write(&table, "Folder,Office,Year\n,Registrar,1950\n").unwrap();

        let err = run(
            dir.path().display().to_string(),
            template.display().to_string(),
            table.display().to_string(),
            false,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::Batch { failed: 1, total: 1 }));
    }

    #[tokio::test]
    async fn test_header_only_spreadsheet_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());

        let table = dir.path().join("folders.csv");
        fs::write(&table, "Folder,Office,Year\n").unwrap();

        run(
            dir.path().display().to_string(),
            template.display().to_string(),
            table.display().to_string(),
            false,
        )
        .await
        .unwrap();

        assert!(!dir.path().join(ledger::LEDGER_FILE).exists());
    }

    #[tokio::test]
    async fn test_missing_template_fails_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("folders.csv");
        fs::write(&table, "Folder\nbox-01\n").unwrap();

        let err = run(
            dir.path().display().to_string(),
            dir.path().join("absent.txt").display().to_string(),
            table.display().to_string(),
            false,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_target_directory_fails_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        let table = dir.path().join("folders.csv");
        fs::write(&table, "Folder\nbox-01\n").unwrap();

        let err = run(
            dir.path().join("absent").display().to_string(),
            template.display().to_string(),
            table.display().to_string(),
            false,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::DirectoryNotFound(_)));
    }

    #[tokio::test]
    async fn test_verbose_run_prints_resolved_record() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        make_folder(dir.path(), "box-01");

        let table = dir.path().join("folders.csv");
        fs::write(&table, "Folder,Office,Year\nbox-01,Registrar,1950\n").unwrap();

        run(
            dir.path().display().to_string(),
            template.display().to_string(),
            table.display().to_string(),
            true,
        )
        .await
        .unwrap();

        assert!(dir.path().join("box-01").join("bagit.txt").is_file());
    }
}

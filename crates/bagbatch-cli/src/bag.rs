//! Bag assembly
//!
//! Turns a plain folder into a self-describing bag in place: the folder's
//! entire contents move under a `data/` payload directory, then the tag
//! files (`bagit.txt`, `bag-info.txt`, payload manifest and tag manifest)
//! are written next to it. The payload move goes through a uniquely named
//! staging directory so a folder that itself contains a `data` entry cannot
//! collide with the payload directory being created.

use crate::baginfo::BagInfo;
use crate::error::{CliError, Result};
use bagbatch_common::checksum::{compute_file_checksum, ChecksumAlgorithm};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Name of the payload directory inside a bag
pub const PAYLOAD_DIR: &str = "data";

/// Name of the bag declaration file
pub const DECLARATION_FILE: &str = "bagit.txt";

/// Name of the bag metadata file
pub const BAG_INFO_FILE: &str = "bag-info.txt";

/// Label for the date a bag was assembled
pub const BAGGING_DATE: &str = "Bagging-Date";

/// Label for the payload byte and file counts
pub const PAYLOAD_OXUM: &str = "Payload-Oxum";

const DECLARATION_CONTENT: &str = "BagIt-Version: 0.97\nTag-File-Character-Encoding: UTF-8\n";

/// Payload manifest file name for an algorithm, e.g. `manifest-sha256.txt`
pub fn manifest_name(algorithm: ChecksumAlgorithm) -> String {
    format!("manifest-{}.txt", algorithm)
}

/// Tag manifest file name for an algorithm, e.g. `tagmanifest-sha256.txt`
pub fn tag_manifest_name(algorithm: ChecksumAlgorithm) -> String {
    format!("tagmanifest-{}.txt", algorithm)
}

/// Convert a folder into a bag carrying the given metadata record
///
/// The record is written as-is except that `Bagging-Date` and `Payload-Oxum`
/// are appended when the record does not already carry them.
pub fn make_bag(folder: impl AsRef<Path>, info: &BagInfo, algorithm: ChecksumAlgorithm) -> Result<()> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(CliError::packaging(format!(
            "'{}' is not a directory",
            folder.display()
        )));
    }

    debug!(folder = %folder.display(), "Assembling bag");
    move_payload(folder)?;
    fs::write(folder.join(DECLARATION_FILE), DECLARATION_CONTENT)?;
    let (octets, streams) = write_payload_manifest(folder, algorithm)?;
    write_bag_info(folder, info, octets, streams)?;
    write_tag_manifest(folder, algorithm)?;

    Ok(())
}

/// Move everything in the folder under a fresh `data/` directory
fn move_payload(folder: &Path) -> Result<()> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        entries.push((entry.path(), entry.file_name()));
    }

    // Entries are collected before the staging directory exists, so the
    // staging directory never moves into itself.
    let staging = folder.join(format!("{}-staging-{}", PAYLOAD_DIR, Uuid::new_v4()));
    fs::create_dir(&staging)?;
    for (path, name) in entries {
        fs::rename(&path, staging.join(name))?;
    }
    fs::rename(&staging, folder.join(PAYLOAD_DIR))?;

    Ok(())
}

/// Every file under the payload directory, sorted for a stable manifest
fn payload_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(folder.join(PAYLOAD_DIR)) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Path of a payload file relative to the bag root, `/`-separated
fn relative_payload_path(folder: &Path, file: &Path) -> Result<String> {
    let relative = file.strip_prefix(folder).map_err(|_| {
        CliError::packaging(format!(
            "payload file '{}' is outside the bag at '{}'",
            file.display(),
            folder.display()
        ))
    })?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Write the payload manifest and return the payload octet and file counts
fn write_payload_manifest(folder: &Path, algorithm: ChecksumAlgorithm) -> Result<(u64, u64)> {
    let mut octets = 0u64;
    let mut streams = 0u64;
    let mut manifest = String::new();

    for file in payload_files(folder)? {
        let digest = compute_file_checksum(&file, algorithm)?;
        octets += fs::metadata(&file)?.len();
        streams += 1;
        manifest.push_str(&format!("{}  {}\n", digest, relative_payload_path(folder, &file)?));
    }

    fs::write(folder.join(manifest_name(algorithm)), manifest)?;
    Ok((octets, streams))
}

/// Write `bag-info.txt` in record order, completing the reserved labels
fn write_bag_info(folder: &Path, info: &BagInfo, octets: u64, streams: u64) -> Result<()> {
    let mut tagged = info.clone();
    if !tagged.contains(BAGGING_DATE) {
        tagged.set(BAGGING_DATE, Local::now().format("%Y-%m-%d").to_string());
    }
    if !tagged.contains(PAYLOAD_OXUM) {
        tagged.set(PAYLOAD_OXUM, format!("{}.{}", octets, streams));
    }

    let mut contents = String::new();
    for (label, value) in tagged.iter() {
        contents.push_str(&format!("{}: {}\n", label, value));
    }

    fs::write(folder.join(BAG_INFO_FILE), contents)?;
    Ok(())
}

/// Write the tag manifest covering every tag file except itself
fn write_tag_manifest(folder: &Path, algorithm: ChecksumAlgorithm) -> Result<()> {
    let tag_files = [
        BAG_INFO_FILE.to_string(),
        DECLARATION_FILE.to_string(),
        manifest_name(algorithm),
    ];

    let mut manifest = String::new();
    for name in tag_files {
        let digest = compute_file_checksum(folder.join(&name), algorithm)?;
        manifest.push_str(&format!("{}  {}\n", digest, name));
    }

    fs::write(folder.join(tag_manifest_name(algorithm)), manifest)?;
    Ok(())
}

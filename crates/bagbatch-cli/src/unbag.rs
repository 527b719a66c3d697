//! Bag disassembly
//!
//! Restores a bagged folder to its pre-bagged layout: the tag files are
//! removed and the payload is hoisted out of `data/` back to the folder
//! root. Every expected tag file is checked before anything is deleted, so
//! a folder that was never bagged (or was half-dismantled by hand) is
//! refused untouched.

use crate::bag;
use crate::error::{CliError, Result};
use bagbatch_common::checksum::ChecksumAlgorithm;
use std::fs;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// Whether a directory carries a bag declaration
pub fn is_bag(folder: impl AsRef<Path>) -> bool {
    folder.as_ref().join(bag::DECLARATION_FILE).is_file()
}

/// Tag files bagging writes, all of which must be present to unbag
fn expected_tag_files() -> [String; 4] {
    [
        bag::DECLARATION_FILE.to_string(),
        bag::BAG_INFO_FILE.to_string(),
        bag::manifest_name(ChecksumAlgorithm::Sha256),
        bag::tag_manifest_name(ChecksumAlgorithm::Sha256),
    ]
}

/// Restore a bagged folder to its original layout
pub fn unbag_folder(folder: impl AsRef<Path>) -> Result<()> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(CliError::DirectoryNotFound(folder.display().to_string()));
    }

    // Pre-flight: verify the full tag set before deleting anything.
    let tag_files = expected_tag_files();
    for name in &tag_files {
        if !folder.join(name).is_file() {
            return Err(CliError::not_a_bag(format!(
                "'{}' is missing '{}'",
                folder.display(),
                name
            )));
        }
    }
    let payload = folder.join(bag::PAYLOAD_DIR);
    if !payload.is_dir() {
        return Err(CliError::not_a_bag(format!(
            "'{}' has no '{}' payload directory",
            folder.display(),
            bag::PAYLOAD_DIR
        )));
    }

    debug!(folder = %folder.display(), "Dismantling bag");
    for name in &tag_files {
        fs::remove_file(folder.join(name))?;
    }

    // Hoist payload entries to the folder root. Entries are collected
    // before any rename so the directory is never mutated mid-read. An
    // entry named like the payload directory itself (a re-bagged bag) is
    // parked under a unique name until `data/` is gone.
    let mut entries = Vec::new();
    for entry in fs::read_dir(&payload)? {
        let entry = entry?;
        entries.push((entry.path(), entry.file_name()));
    }

    let mut parked = None;
    for (path, name) in entries {
        if name == bag::PAYLOAD_DIR {
            let spot = folder.join(format!("{}-restore-{}", bag::PAYLOAD_DIR, Uuid::new_v4()));
            fs::rename(&path, &spot)?;
            parked = Some(spot);
        } else {
            fs::rename(&path, folder.join(name))?;
        }
    }

    fs::remove_dir(&payload)?;
    if let Some(spot) = parked {
        fs::rename(spot, payload)?;
    }

    Ok(())
}

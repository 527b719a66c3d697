//! `bagbatch unbag` command implementation
//!
//! Restores bagged folders to their pre-bag layout. With explicit folder
//! names it restores exactly those; with none it scans the target directory
//! and restores every bag found there, behind a confirmation prompt.

use crate::error::{CliError, Result};
use crate::unbag;
use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Restore bags under the target directory to plain folders
pub async fn run(directory: String, folders: Vec<String>, yes: bool) -> Result<()> {
    let target_dir = PathBuf::from(&directory);
    if !target_dir.is_dir() {
        return Err(CliError::DirectoryNotFound(directory));
    }

    let candidates: Vec<PathBuf> = if folders.is_empty() {
        detect_bags(&target_dir)?
    } else {
        folders.iter().map(|name| target_dir.join(name)).collect()
    };

    if candidates.is_empty() {
        println!("No bags found under '{}'.", target_dir.display());
        return Ok(());
    }

    println!(
        "{} Unbagging {} folder(s) under '{}'",
        "→".cyan(),
        candidates.len(),
        target_dir.display()
    );
    for path in &candidates {
        println!("    {}", path.display());
    }
    println!();

    // Confirmation prompt (unless --yes flag is used)
    if !yes {
        println!(
            "{}",
            "This will delete bag metadata files and move payload back in place.".yellow()
        );
        println!();

        print!("Continue? [y/N]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        if input != "y" && input != "yes" {
            println!("Unbagging cancelled.");
            return Ok(());
        }
    }

    info!(
        folders = candidates.len(),
        target = %target_dir.display(),
        "Starting unbag batch"
    );

    let mut restored = 0usize;
    let mut failed = 0usize;
    for path in &candidates {
        match unbag::unbag_folder(path) {
            Ok(()) => {
                restored += 1;
                println!("{} {}", "✓".green(), path.display());
            },
            Err(e) => {
                failed += 1;
                error!(folder = %path.display(), error = %e, "Unbag failed");
                eprintln!("{} {}: {}", "✗".red(), path.display(), e);
            },
        }
    }

    println!();
    if failed == 0 {
        println!("{} {} folder(s) restored", "✓".green().bold(), restored);
        Ok(())
    } else {
        println!("{} {} restored, {} failed", "!".yellow().bold(), restored, failed);
        Err(CliError::Batch {
            failed,
            total: candidates.len(),
        })
    }
}

/// Find every bag directly under the target directory, sorted by name
///
/// Non-bag directories are reported and skipped so a target directory that
/// mixes bagged and plain folders can still be processed in one pass.
fn detect_bags(target_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut bags = Vec::new();
    for entry in fs::read_dir(target_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        if unbag::is_bag(&path) {
            bags.push(path);
        } else {
            println!("Skipping '{}': no bagit.txt found", path.display());
        }
    }
    bags.sort();
    Ok(bags)
}

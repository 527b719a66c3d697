//! Build automation tasks for Bagbatch
//!
//! This tool provides various automation tasks for the Bagbatch project, including:
//! - Generating CLI documentation from source code
//! - Future build-related tasks

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for Bagbatch", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate CLI documentation in Markdown format
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    // Generate markdown from clap definitions
    let markdown = clap_markdown::help_markdown::<bagbatch_cli::Cli>();

    let doc_content = format!(
        r#"---
title: CLI Reference
description: Complete command reference for the Bagbatch CLI
---

# Bagbatch CLI Reference

This documentation is auto-generated from the CLI source code. Last updated: {}.

## Overview

Bagbatch is a command-line tool that bags archival folders in batches, driven
by a spreadsheet and a bag-info metadata template, and restores them on demand.

## Installation

### From Source

```bash
git clone https://github.com/bagbatch/bagbatch.git
cd bagbatch
cargo install --path crates/bagbatch-cli
```

## Quick Start

```bash
# Bag every folder the spreadsheet lists
bagbatch bag --directory /archives/accession-2024 \
  --baginfo baginfo.txt \
  --csv folders.csv

# Restore two folders to their original layout
bagbatch unbag box-01 box-02 --directory /archives/accession-2024

# Restore every bag in the directory without prompting
bagbatch unbag --directory /archives/accession-2024 --yes
```

## Commands

{}

## Environment Variables

- `BAGBATCH_DIRECTORY` - Directory holding the folders to process (default: `.`)
- `LOG_LEVEL` - Logging level (e.g., `debug`, `info`, `warn`, `error`)
- `LOG_OUTPUT` - Logging target (`console`, `file`, or `both`)

## Metadata Template

The `--baginfo` template holds one `Label: value` entry per line. Values may
reference spreadsheet columns with `[[Column]]` placeholders, which are filled
per folder from that folder's row:

```text
Source-Organization: Example University
Contact-Name: A. Archivist
External-Description: Records of [[Office]], [[Year]]
External-Identifier: accession-2024-001
```

Lines that do not start with a recognized label continue the entry above them.
Repeating a label folds the values into one entry separated by ` | `.

## Identifier Ledger

Every bag is assigned a fresh UUID, recorded both in the bag's
`External-Identifier` and in a `UUIDs.csv` ledger written next to the bagged
folders. The ledger accumulates one `folder,identifier` row per bag across
runs.

---

*This documentation is automatically generated from the CLI source code. To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    // Create output directory if it doesn't exist
    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    // Write the markdown file
    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, doc_content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Review the generated documentation");
    println!("  2. Commit it to version control");
    println!("  3. Add a CI check to ensure docs stay in sync");

    Ok(())
}

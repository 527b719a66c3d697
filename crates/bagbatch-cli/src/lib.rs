//! Bagbatch CLI Library
//!
//! Command-line interface for bagging archival folders in batches.
//!
//! # Overview
//!
//! Bagbatch turns plain folders into bags and back again:
//!
//! - **Batch Bagging**: Bag every folder a spreadsheet lists (`bagbatch bag`)
//! - **Metadata Templates**: Fill a labeled template per folder, with
//!   `[[Column]]` placeholders drawn from the spreadsheet row
//! - **Identifier Ledger**: Record the identifier minted for each bag in
//!   `UUIDs.csv` next to the bagged folders
//! - **Restoration**: Undo bagging and recover the original layout
//!   (`bagbatch unbag`)

pub mod bag;
pub mod baginfo;
pub mod commands;
pub mod error;
pub mod fields;
pub mod ledger;
pub mod progress;
pub mod size;
pub mod substitution;
pub mod tabular;
pub mod template;
pub mod unbag;

// Re-export commonly used types
pub use baginfo::BagInfo;
pub use error::{CliError, Result};

use clap::{Parser, Subcommand};

/// Bagbatch - Batch Bagging for Archival Folders
#[derive(Parser, Debug)]
#[command(name = "bagbatch")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bag every folder listed in a spreadsheet
    Bag {
        /// Directory holding the folders to bag
        #[arg(short, long, env = "BAGBATCH_DIRECTORY", default_value = ".")]
        directory: String,

        /// Metadata template file with one "Label: value" entry per line
        #[arg(short, long)]
        baginfo: String,

        /// Spreadsheet (.csv or .xlsx) naming one folder per row
        #[arg(short, long)]
        csv: String,
    },

    /// Restore bagged folders to their original layout
    Unbag {
        /// Folders to restore (every bag in the directory when omitted)
        folders: Vec<String>,

        /// Directory holding the bagged folders
        #[arg(short, long, env = "BAGBATCH_DIRECTORY", default_value = ".")]
        directory: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

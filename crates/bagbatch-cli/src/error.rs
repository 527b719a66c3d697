//! Error types for the bagbatch CLI
//!
//! This module provides user-friendly error types with clear, actionable messages
//! that help users understand what went wrong and how to fix it.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
///
/// All errors are designed to be user-facing with clear messages and suggestions.
#[derive(Error, Debug)]
pub enum CliError {
    /// Required file is missing
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// Required directory is missing
    #[error("Directory not found: '{0}'. Verify the directory exists and you have read permissions.")]
    DirectoryNotFound(String),

    /// Metadata template file has invalid format or content
    #[error("Invalid metadata template: {0}. Every line must start with a recognized label, or continue the labeled line above it.")]
    InvalidTemplate(String),

    /// Spreadsheet file has invalid format or content
    #[error("Invalid spreadsheet: {0}. Provide a .csv or .xlsx file with a header row followed by one row per folder.")]
    InvalidTabular(String),

    /// A data row is shorter than the header row
    #[error("Row for '{folder}' has {actual} column(s) but the header row defines {expected}. Each row must supply a value for every header column.")]
    RowTooShort {
        folder: String,
        expected: usize,
        actual: usize,
    },

    /// A data row does not name a folder in its first column
    #[error("Row {0} has an empty first column. The first column must name a folder inside the target directory.")]
    EmptyFolderName(usize),

    /// A folder does not carry the tag files written during bagging
    #[error("Not a bag: {0}. Only folders previously bagged by this tool can be unbagged.")]
    NotABag(String),

    /// Bag assembly failed for a folder
    #[error("Packaging failed: {0}")]
    Packaging(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing failed
    #[error("CSV error: {0}. Check the file syntax and permissions.")]
    Csv(#[from] csv::Error),

    /// Directory traversal failed
    #[error("Directory walk failed: {0}. Check folder permissions.")]
    Walk(#[from] walkdir::Error),

    /// Error from the shared bagbatch library
    #[error(transparent)]
    Common(#[from] bagbatch_common::BagError),

    /// One or more folders in a batch could not be processed
    #[error("{failed} of {total} folder(s) failed. See the messages above for details.")]
    Batch { failed: usize, total: usize },
}

impl CliError {
    /// Create an invalid template error
    pub fn invalid_template(msg: impl Into<String>) -> Self {
        Self::InvalidTemplate(msg.into())
    }

    /// Create an invalid spreadsheet error
    pub fn invalid_tabular(msg: impl Into<String>) -> Self {
        Self::InvalidTabular(msg.into())
    }

    /// Create a packaging error
    pub fn packaging(msg: impl Into<String>) -> Self {
        Self::Packaging(msg.into())
    }

    /// Create a not-a-bag error
    pub fn not_a_bag(msg: impl Into<String>) -> Self {
        Self::NotABag(msg.into())
    }
}

//! Bagbatch Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared utilities and error handling for the bagbatch workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all bagbatch workspace
//! members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Checksums**: Streaming payload digest utilities
//! - **Logging**: Tracing subscriber configuration and initialization
//!
//! # Example
//!
//! ```no_run
//! use bagbatch_common::checksum::{compute_file_checksum, ChecksumAlgorithm};
//! use bagbatch_common::Result;
//!
//! fn digest(path: &str) -> Result<String> {
//!     compute_file_checksum(path, ChecksumAlgorithm::Sha256)
//! }
//! ```

pub mod checksum;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{BagError, Result};

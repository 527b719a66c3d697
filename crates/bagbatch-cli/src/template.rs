//! Metadata template parsing
//!
//! A template is a plain-text file of `Label: value` lines describing the
//! metadata every bag in a batch shares. Only labels from
//! [`fields::RECOGNIZED_LABELS`] start a new entry; any other non-blank line
//! continues the entry above it, so descriptions can wrap across lines
//! without escaping. Values may carry `[[Column]]` placeholders that are
//! filled in per folder at bagging time.

use crate::baginfo::BagInfo;
use crate::error::{CliError, Result};
use crate::fields;
use std::fs;
use std::path::Path;

/// Read and parse a template file
pub fn load(path: impl AsRef<Path>) -> Result<BagInfo> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Parse template text into a base metadata record
///
/// Errors when a line neither starts with a recognized label nor has a
/// labeled line above it to continue.
pub fn parse(text: &str) -> Result<BagInfo> {
    let mut record = BagInfo::new();
    let mut current_label: Option<String> = None;

    for (number, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_start();
        if line.is_empty() {
            continue;
        }

        if let Some((head, rest)) = line.split_once(':') {
            if fields::is_recognized(head) {
                record.merge(head, rest.trim_start());
                current_label = Some(head.to_string());
                continue;
            }
        }

        match current_label.as_deref() {
            Some(label) => record.append_line(label, line),
            None => {
                return Err(CliError::invalid_template(format!(
                    "line {} ('{}') does not start with a recognized label",
                    number + 1,
                    line
                )))
            },
        }
    }

    Ok(record)
}

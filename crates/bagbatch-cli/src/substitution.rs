//! Per-folder placeholder substitution
//!
//! Each spreadsheet row is bound to the header row by position, and the
//! resulting bindings fill the `[[Column]]` placeholders in the base metadata
//! record. The base record itself is never modified; every folder gets its
//! own resolved copy.

use crate::baginfo::BagInfo;
use crate::error::{CliError, Result};

/// Opening delimiter of a placeholder
const TOKEN_OPEN: &str = "[[";
/// Closing delimiter of a placeholder
const TOKEN_CLOSE: &str = "]]";

/// Column values of one spreadsheet row, keyed by header name
#[derive(Debug, Clone)]
pub struct RowBinding {
    columns: Vec<(String, String)>,
}

impl RowBinding {
    /// Pair header names with one row's cells
    ///
    /// Rows shorter than the header are rejected; extra trailing cells are
    /// ignored.
    pub fn bind(headers: &[String], cells: &[String]) -> Result<Self> {
        if cells.len() < headers.len() {
            return Err(CliError::RowTooShort {
                folder: cells.first().cloned().unwrap_or_default(),
                expected: headers.len(),
                actual: cells.len(),
            });
        }

        let columns = headers
            .iter()
            .cloned()
            .zip(cells.iter().cloned())
            .collect();
        Ok(Self { columns })
    }

    /// Value bound to a column name, compared case-insensitively
    ///
    /// A header repeated verbatim keeps one column whose rightmost cell
    /// wins; headers differing only in case stay separate columns, and the
    /// leftmost of them answers for every case variant of the name.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let wanted = name.to_lowercase();
        let key = self
            .columns
            .iter()
            .map(|(column, _)| column)
            .find(|column| column.to_lowercase() == wanted)?;
        self.columns
            .iter()
            .rev()
            .find(|(column, _)| column == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Produce the resolved metadata record for one folder
///
/// Every value is substituted first and normalized second, so newline and
/// spacing cleanup also covers whatever the spreadsheet supplied.
pub fn resolve(base: &BagInfo, row: &RowBinding) -> BagInfo {
    let mut resolved = BagInfo::new();
    for (label, value) in base.iter() {
        resolved.set(label, normalize(&substitute(value, row)));
    }
    resolved
}

/// Replace `[[Column]]` placeholders with the row's values
///
/// A placeholder naming no column passes through verbatim. Replacement text
/// is never rescanned, so placeholder-shaped column values survive as-is.
fn substitute(value: &str, row: &RowBinding) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    loop {
        let Some(start) = rest.find(TOKEN_OPEN) else {
            break;
        };
        let after_open = &rest[start + TOKEN_OPEN.len()..];
        let Some(name_len) = after_open.find(TOKEN_CLOSE) else {
            break;
        };

        match row.lookup(&after_open[..name_len]) {
            Some(replacement) => {
                out.push_str(&rest[..start]);
                out.push_str(replacement);
                rest = &after_open[name_len + TOKEN_CLOSE.len()..];
            },
            None => {
                // Unknown column. Emit the opener and rescan right after it,
                // so a token overlapping this span can still match.
                out.push_str(&rest[..start + TOKEN_OPEN.len()]);
                rest = after_open;
            },
        }
    }

    out.push_str(rest);
    out
}

/// Flatten a resolved value onto a single tag line
///
/// Trailing whitespace goes first, embedded newlines become spaces, and
/// doubled spaces collapse in one left-to-right pass.
fn normalize(value: &str) -> String {
    value.trim_end().replace('\n', " ").replace("  ", " ")
}

//! Payload size measurement and rendering
//!
//! Bags advertise their payload size in `bag-info.txt` under `Bag-Size`, in
//! the shape curators are used to reading: a unit is only used once the size
//! strictly exceeds one of it, so 1024 bytes still reads "1024 bytes" and
//! 1048575 bytes reads "1024.0 KB" rather than rounding up a megabyte.

use crate::baginfo::BagInfo;
use crate::error::Result;
use crate::fields;
use std::path::Path;
use walkdir::WalkDir;

const UNITS: &[(&str, u64)] = &[
    ("TB", 1u64 << 40),
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("KB", 1 << 10),
];

/// Total size in bytes of every file under a directory
pub fn directory_size(path: impl AsRef<Path>) -> Result<u64> {
    let mut total = 0u64;
    for entry in WalkDir::new(path.as_ref()) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}

/// Render a byte count in the largest unit it strictly exceeds one of
pub fn render(bytes: u64) -> String {
    for (unit, scale) in UNITS {
        let scaled = bytes as f64 / *scale as f64;
        if scaled > 1.0 {
            return format!("{:.1} {}", scaled, unit);
        }
    }
    format!("{} bytes", bytes)
}

/// Measure a folder and record its rendered size under `Bag-Size`
///
/// Returns the raw byte total for run summaries.
pub fn annotate(record: &mut BagInfo, folder: impl AsRef<Path>) -> Result<u64> {
    let total = directory_size(folder)?;
    record.set(fields::BAG_SIZE, render(total));
    Ok(total)
}

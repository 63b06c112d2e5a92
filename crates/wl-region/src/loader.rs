//! CSV registry loader.
//!
//! # CSV format
//!
//! One row per region, yearly aggregates already cleaned and merged:
//!
//! ```csv
//! dsa,transplants,additions,ignored_removals,waiting_list
//! CAOP,1102,2891,310,11482
//! ILIP,612,1560,171,4210
//! ```
//!
//! Thousands separators inside quoted numbers (`"2,891"`) are accepted, as
//! registry exports commonly contain them.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{RegionError, RegistryRecord, RegistryTable};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawRecord {
    dsa:              String,
    transplants:      String,
    additions:        String,
    ignored_removals: String,
    waiting_list:     String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RegistryTable`] from a CSV file.
pub fn load_registry_csv(path: &Path) -> Result<RegistryTable, RegionError> {
    let file = std::fs::File::open(path).map_err(RegionError::Io)?;
    load_registry_reader(file)
}

/// Like [`load_registry_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded data.
pub fn load_registry_reader<R: Read>(reader: R) -> Result<RegistryTable, RegionError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (line, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.map_err(|e| RegionError::Parse(e.to_string()))?;
        let row = line + 2; // 1-based, after the header
        records.push(RegistryRecord {
            transplants:      parse_number(&raw.transplants, "transplants", row)?,
            additions:        parse_number(&raw.additions, "additions", row)?,
            ignored_removals: parse_number(&raw.ignored_removals, "ignored_removals", row)?,
            waiting_list:     parse_count(&raw.waiting_list, row)?,
            dsa:              raw.dsa,
        });
    }

    RegistryTable::new(records)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_number(s: &str, column: &str, row: usize) -> Result<f64, RegionError> {
    let v: f64 = s.replace(',', "").parse().map_err(|_| {
        RegionError::Parse(format!("row {row}: {column} {s:?} is not a number"))
    })?;
    if !v.is_finite() || v < 0.0 {
        return Err(RegionError::Parse(format!("row {row}: {column} {s:?} must be non-negative")));
    }
    Ok(v)
}

fn parse_count(s: &str, row: usize) -> Result<u64, RegionError> {
    s.replace(',', "").parse().map_err(|_| {
        RegionError::Parse(format!("row {row}: waiting_list {s:?} is not a whole number"))
    })
}

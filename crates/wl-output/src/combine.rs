//! Merging the run tables of several batches into one file.

use std::fs;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::info;

use crate::{OutputError, OutputResult};

/// Column rows are ordered by.
pub const SORT_COLUMN: &str = "advantage_prob";

/// Concatenate every `*.csv` run table in `dir` into `out`, with rows
/// sorted by [`SORT_COLUMN`] (stable, ascending).
///
/// Files are read in name order and must share one header.  `out` is
/// skipped if it lives in `dir`.  Returns the number of data rows written.
pub fn combine_run_tables(dir: &Path, out: &Path) -> OutputResult<usize> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    let out_key = resolved(out);
    paths.retain(|p| p.extension().is_some_and(|ext| ext == "csv") && resolved(p) != out_key);
    paths.sort();

    let mut header: Option<StringRecord> = None;
    let mut sort_col = 0;
    let mut rows: Vec<(f64, StringRecord)> = Vec::new();

    for path in &paths {
        let mut reader = csv::Reader::from_path(path)?;
        let this = reader.headers()?.clone();
        match &header {
            Some(first) if *first != this => {
                return Err(OutputError::Combine(format!(
                    "{} has a different header",
                    path.display()
                )));
            }
            Some(_) => {}
            None => {
                sort_col = this.iter().position(|h| h == SORT_COLUMN).ok_or_else(|| {
                    OutputError::Combine(format!("{} has no {SORT_COLUMN} column", path.display()))
                })?;
                header = Some(this);
            }
        }

        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let key = record
                .get(sort_col)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .ok_or_else(|| {
                    OutputError::Combine(format!(
                        "{} row {}: bad {SORT_COLUMN}",
                        path.display(),
                        i + 1
                    ))
                })?;
            rows.push((key, record));
        }
    }

    let header = header
        .ok_or_else(|| OutputError::Combine(format!("no run tables in {}", dir.display())))?;

    rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut writer = csv::Writer::from_path(out)?;
    writer.write_record(&header)?;
    for (_, record) in &rows {
        writer.write_record(record)?;
    }
    writer.flush()?;

    info!(files = paths.len(), rows = rows.len(), out = %out.display(), "combined run tables");
    Ok(rows.len())
}

/// Absolute form of `path` for comparison.  `out` may not exist yet, so fall
/// back to resolving its parent directory and re-attaching the file name.
fn resolved(path: &Path) -> PathBuf {
    if let Ok(p) = fs::canonicalize(path) {
        return p;
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

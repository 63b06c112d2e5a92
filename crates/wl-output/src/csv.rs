//! CSV output backend.
//!
//! Writes a run table (one row per run, [`RUN_COLUMNS`]) and, optionally,
//! a tick summary table (one row per month per run, [`TICK_COLUMNS`]).

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{RUN_COLUMNS, TICK_COLUMNS};
use crate::writer::OutputWriter;
use crate::{OutputResult, RunRow, TickSummaryRow};

/// Run table file name used by [`CsvWriter::in_dir`].
pub const RUN_TABLE_FILE: &str = "run_summaries.csv";

/// Tick summary file name used by [`CsvWriter::in_dir`].
pub const TICK_SUMMARY_FILE: &str = "tick_summaries.csv";

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    runs:     Writer<File>,
    ticks:    Option<Writer<File>>,
    finished: bool,
}

impl CsvWriter {
    /// Create the run table at `runs_path` and write its header row.
    /// Tick summaries are discarded.
    pub fn new(runs_path: &Path) -> OutputResult<Self> {
        let mut runs = Writer::from_path(runs_path)?;
        runs.write_record(RUN_COLUMNS)?;
        Ok(Self { runs, ticks: None, finished: false })
    }

    /// Create both tables in `dir` under their standard names.
    pub fn in_dir(dir: &Path) -> OutputResult<Self> {
        Self::new(&dir.join(RUN_TABLE_FILE))?.with_tick_summaries(&dir.join(TICK_SUMMARY_FILE))
    }

    /// Also write tick summaries, to `path`.
    pub fn with_tick_summaries(mut self, path: &Path) -> OutputResult<Self> {
        let mut ticks = Writer::from_path(path)?;
        ticks.write_record(TICK_COLUMNS)?;
        self.ticks = Some(ticks);
        Ok(self)
    }
}

impl OutputWriter for CsvWriter {
    fn write_run(&mut self, row: &RunRow) -> OutputResult<()> {
        self.runs.write_record(row.fields())?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        if let Some(ticks) = &mut self.ticks {
            ticks.write_record(row.fields())?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.runs.flush()?;
        if let Some(ticks) = &mut self.ticks {
            ticks.flush()?;
        }
        Ok(())
    }
}

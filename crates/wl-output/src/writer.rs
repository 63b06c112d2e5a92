//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, RunRow, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors raised while a model is running are stored by
/// [`SimOutputObserver`][crate::SimOutputObserver] and retrieved with
/// [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Append one run to the run table.
    fn write_run(&mut self, row: &RunRow) -> OutputResult<()>;

    /// Write one month's summary.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every summary of a batch, in order, then finish the writer.
pub fn write_runs<'a, W, I>(writer: &mut W, summaries: I) -> OutputResult<()>
where
    W: OutputWriter + ?Sized,
    I: IntoIterator<Item = &'a wl_sim::RunSummary>,
{
    for summary in summaries {
        writer.write_run(&RunRow::from(summary))?;
    }
    writer.finish()
}

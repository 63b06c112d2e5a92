//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use wl_core::Tick;
use wl_sim::{RunSummary, SimObserver, TickReport};

use crate::row::{RunRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes a tick summary for every simulated month
/// to any [`OutputWriter`] backend, and the run row once the caller hands
/// over the finished model's summary.
///
/// One observer can follow several runs in sequence; call
/// [`begin_run`][Self::begin_run] before each so tick rows carry the right
/// seed.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `model.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    seed:       u64,
    last_tick:  Option<Tick>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, seed: 0, last_tick: None, last_error: None }
    }

    /// Tag subsequent tick rows with `seed`.
    pub fn begin_run(&mut self, seed: u64) {
        self.seed = seed;
        self.last_tick = None;
    }

    /// Month counter at which the current run ended, once it has.
    pub fn final_tick(&self) -> Option<Tick> {
        self.last_tick
    }

    /// Append the finished run's row.
    pub fn record_run(&mut self, summary: &RunSummary) {
        let result = self.writer.write_run(&RunRow::from(summary));
        self.store_err(result);
    }

    /// Take the stored write error (if any) after `model.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Finish the writer, reporting the first error seen during the runs.
    pub fn finish(mut self) -> OutputResult<W> {
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        self.writer.finish()?;
        Ok(self.writer)
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        let row = TickSummaryRow::new(self.seed, tick, report);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.last_tick = Some(final_tick);
    }
}

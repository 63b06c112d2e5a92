//! Simulation observer trait for progress reporting and data collection.

use wl_core::Tick;

use crate::ConditionCounts;

/// What happened during one monthly tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Patients per condition, snapshotted after the lifecycle update and
    /// before this month's allocation.
    pub counts:   ConditionCounts,
    /// Patients selected for transplant across all regions this month.
    pub selected: u64,
    /// New patients added to the lists this month.
    pub arrivals: u64,
}

/// Callbacks invoked by [`Model::run`][crate::Model::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: yearly progress printer
///
/// ```rust,ignore
/// struct YearPrinter;
///
/// impl SimObserver for YearPrinter {
///     fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
///         if tick.is_year_start() {
///             println!("{tick}: {} waiting", report.counts.waiting);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, before the month counter advances.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called once when the run terminates.  `final_tick` is the month
    /// counter after the last processed tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

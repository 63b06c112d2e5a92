//! `wl-output` — run tables and monthly summaries for the waitlist
//! simulation.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Output                                              |
//! |-----------|---------|-----------------------------------------------------|
//! | *(none)*  | CSV     | a run table, optionally a tick summary table        |
//! | `sqlite`  | SQLite  | one database with `run_summaries`, `tick_summaries` |
//!
//! Both implement [`OutputWriter`].  Tick summaries are produced by
//! [`SimOutputObserver`], which implements `wl_sim::SimObserver`; run rows
//! come from [`RunRow::from`] a finished model's `RunSummary`.
//!
//! [`combine_run_tables`] merges the run tables of several batches (for
//! example one per advantage probability) into a single file.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wl_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::in_dir(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! obs.begin_run(model.config.seed);
//! model.run(&mut obs)?;
//! obs.record_run(&model.summary());
//! obs.finish()?;
//! ```

pub mod combine;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use combine::{SORT_COLUMN, combine_run_tables};
pub use csv::{CsvWriter, RUN_TABLE_FILE, TICK_SUMMARY_FILE};
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{RUN_COLUMNS, RunRow, TICK_COLUMNS, TickSummaryRow, VECTOR_SEPARATOR};
pub use writer::{OutputWriter, write_runs};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

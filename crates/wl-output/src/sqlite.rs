//! SQLite output backend (feature `sqlite`).
//!
//! Creates one database with two tables: `run_summaries` and
//! `tick_summaries`.  Per-region columns are stored as `;`-joined text.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, RunRow, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS run_summaries (
                 dsas                      TEXT    NOT NULL,
                 advantage_prob            REAL    NOT NULL,
                 seed                      INTEGER NOT NULL,
                 primary_transplants       INTEGER NOT NULL,
                 alternate_transplants     INTEGER NOT NULL,
                 transplants               INTEGER NOT NULL,
                 primary_listings          INTEGER NOT NULL,
                 alternate_listings        INTEGER NOT NULL,
                 count_waiting             INTEGER NOT NULL,
                 count_deceased            INTEGER NOT NULL,
                 count_advantaged_deceased INTEGER NOT NULL,
                 advantaged_transplants    INTEGER NOT NULL,
                 average_wait              REAL    NOT NULL,
                 death_region              TEXT    NOT NULL,
                 primary_wl                TEXT    NOT NULL,
                 primary_tx                TEXT    NOT NULL,
                 wait_rates                TEXT    NOT NULL,
                 advantaged_wait           REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 seed         INTEGER NOT NULL,
                 tick         INTEGER NOT NULL,
                 waiting      INTEGER NOT NULL,
                 selected     INTEGER NOT NULL,
                 transplanted INTEGER NOT NULL,
                 deceased     INTEGER NOT NULL,
                 selections   INTEGER NOT NULL,
                 arrivals     INTEGER NOT NULL,
                 PRIMARY KEY (seed, tick)
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_run(&mut self, row: &RunRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO run_summaries VALUES \
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
        )?;
        stmt.execute(rusqlite::params![
            row.regions,
            row.advantage_prob,
            row.seed as i64,
            row.primary_transplants as i64,
            row.alternate_transplants as i64,
            row.transplants as i64,
            row.primary_listings as i64,
            row.alternate_listings as i64,
            row.count_waiting as i64,
            row.count_deceased as i64,
            row.count_advantaged_deceased as i64,
            row.advantaged_transplants as i64,
            row.average_wait,
            row.death_region,
            row.primary_wl,
            row.primary_tx,
            row.wait_rates,
            row.advantaged_wait,
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO tick_summaries \
             (seed, tick, waiting, selected, transplanted, deceased, selections, arrivals) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        stmt.execute(rusqlite::params![
            row.seed as i64,
            row.tick as i64,
            row.waiting as i64,
            row.selected as i64,
            row.transplanted as i64,
            row.deceased as i64,
            row.selections as i64,
            row.arrivals as i64,
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

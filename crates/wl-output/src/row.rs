//! Plain data row types written by output backends.

use std::fmt::Display;

use wl_core::Tick;
use wl_sim::{RunSummary, TickReport};

/// Column names of a run table, in file order.
pub const RUN_COLUMNS: [&str; 18] = [
    "DSAs",
    "advantage_prob",
    "seed",
    "Primary_Transplants",
    "Alternate_Transplants",
    "Transplants",
    "Primary_Listings",
    "Alternate_Listings",
    "Count_Waiting",
    "Count_Deceased",
    "Count_Advantaged_Deceased",
    "Advantaged_Transplants",
    "Average_Wait",
    "Death_Region",
    "Primary_WL",
    "Primary_TX",
    "Wait_Rates",
    "Advantaged_Wait",
];

/// Column names of a tick summary table, in file order.
pub const TICK_COLUMNS: [&str; 8] = [
    "seed",
    "tick",
    "waiting",
    "selected",
    "transplanted",
    "deceased",
    "selections",
    "arrivals",
];

/// Separator between the elements of a per-region column.
pub const VECTOR_SEPARATOR: &str = ";";

/// One row of a run table.  Per-region vectors are pre-joined with
/// [`VECTOR_SEPARATOR`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunRow {
    pub regions:                   String,
    pub advantage_prob:            f64,
    pub seed:                      u64,
    pub primary_transplants:       u64,
    pub alternate_transplants:     u64,
    pub transplants:               u64,
    pub primary_listings:          u64,
    pub alternate_listings:        u64,
    pub count_waiting:             u64,
    pub count_deceased:            u64,
    pub count_advantaged_deceased: u64,
    pub advantaged_transplants:    u64,
    pub average_wait:              f64,
    pub death_region:              String,
    pub primary_wl:                String,
    pub primary_tx:                String,
    pub wait_rates:                String,
    pub advantaged_wait:           f64,
}

impl From<&RunSummary> for RunRow {
    fn from(s: &RunSummary) -> Self {
        Self {
            regions:                   s.regions.clone(),
            advantage_prob:            s.advantage_probability,
            seed:                      s.seed,
            primary_transplants:       s.primary_transplants,
            alternate_transplants:     s.alternate_transplants,
            transplants:               s.transplants,
            primary_listings:          s.primary_listings,
            alternate_listings:        s.alternate_listings,
            count_waiting:             s.count_waiting,
            count_deceased:            s.count_deceased,
            count_advantaged_deceased: s.count_advantaged_deceased,
            advantaged_transplants:    s.advantaged_transplants,
            average_wait:              s.average_wait,
            death_region:              join(&s.death_region),
            primary_wl:                join(&s.primary_wl),
            primary_tx:                join(&s.primary_tx),
            wait_rates:                join(&s.wait_rates),
            advantaged_wait:           s.advantaged_wait,
        }
    }
}

impl RunRow {
    /// Field values as text, in [`RUN_COLUMNS`] order.
    pub fn fields(&self) -> [String; 18] {
        [
            self.regions.clone(),
            self.advantage_prob.to_string(),
            self.seed.to_string(),
            self.primary_transplants.to_string(),
            self.alternate_transplants.to_string(),
            self.transplants.to_string(),
            self.primary_listings.to_string(),
            self.alternate_listings.to_string(),
            self.count_waiting.to_string(),
            self.count_deceased.to_string(),
            self.count_advantaged_deceased.to_string(),
            self.advantaged_transplants.to_string(),
            self.average_wait.to_string(),
            self.death_region.clone(),
            self.primary_wl.clone(),
            self.primary_tx.clone(),
            self.wait_rates.clone(),
            self.advantaged_wait.to_string(),
        ]
    }
}

/// Condition counts and activity for one month of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub seed:         u64,
    pub tick:         u64,
    pub waiting:      u64,
    pub selected:     u64,
    pub transplanted: u64,
    pub deceased:     u64,
    /// Patients selected for transplant during the month.
    pub selections:   u64,
    pub arrivals:     u64,
}

impl TickSummaryRow {
    pub fn new(seed: u64, tick: Tick, report: &TickReport) -> Self {
        Self {
            seed,
            tick:         tick.0,
            waiting:      report.counts.waiting,
            selected:     report.counts.selected,
            transplanted: report.counts.transplanted,
            deceased:     report.counts.deceased,
            selections:   report.selected,
            arrivals:     report.arrivals,
        }
    }

    /// Field values as text, in [`TICK_COLUMNS`] order.
    pub fn fields(&self) -> [String; 8] {
        [
            self.seed,
            self.tick,
            self.waiting,
            self.selected,
            self.transplanted,
            self.deceased,
            self.selections,
            self.arrivals,
        ]
        .map(|v| v.to_string())
    }
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(VECTOR_SEPARATOR)
}

//! Read-only statistics over the patient population.
//!
//! Every average returns `0.0` when nobody satisfies its filter, and every
//! per-region vector is indexed by `RegionId` with one entry per region.

use wl_patient::{Condition, PatientStore, PatientView};

use crate::Model;

// ── ConditionCounts ───────────────────────────────────────────────────────────

/// Number of patients in each condition at one point in time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConditionCounts {
    pub waiting:      u64,
    pub selected:     u64,
    pub transplanted: u64,
    pub deceased:     u64,
}

impl ConditionCounts {
    /// Count every patient in `store` in a single pass.
    pub fn of(store: &PatientStore) -> Self {
        let mut counts = Self::default();
        for c in store.conditions() {
            match c {
                Condition::Waiting => counts.waiting += 1,
                Condition::Selected => counts.selected += 1,
                Condition::Transplanted => counts.transplanted += 1,
                Condition::Deceased => counts.deceased += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> u64 {
        self.waiting + self.selected + self.transplanted + self.deceased
    }
}

// ── RunSummary ────────────────────────────────────────────────────────────────

/// The metrics a batch harness collects after a run, one field per report
/// column.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub regions:                   String,
    pub advantage_probability:     f64,
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
    pub death_region:              Vec<u64>,
    pub primary_wl:                Vec<u64>,
    pub primary_tx:                Vec<u64>,
    pub wait_rates:                Vec<f64>,
    pub advantaged_wait:           f64,
    /// Months simulated before the run stopped.
    pub months:                    u64,
}

// ── Accessors ─────────────────────────────────────────────────────────────────

impl Model {
    /// Patients currently in `condition`.
    pub fn count(&self, condition: Condition) -> u64 {
        self.patients.count(condition) as u64
    }

    /// Transplants given to patients through their primary region.
    pub fn primary_center_transplants(&self) -> u64 {
        self.tallies.primary_transplants.iter().sum()
    }

    /// Transplants given to patients through a secondary listing.
    pub fn alternate_center_transplants(&self) -> u64 {
        self.tallies.alternate_transplants.iter().sum()
    }

    pub fn primary_listings(&self) -> u64 {
        self.tallies.primary_listings.iter().sum()
    }

    pub fn alternate_listings(&self) -> u64 {
        self.tallies.alternate_listings.iter().sum()
    }

    pub fn waiting(&self) -> u64 {
        self.count(Condition::Waiting)
    }

    pub fn deceased(&self) -> u64 {
        self.count(Condition::Deceased)
    }

    /// Patients who received an organ (`Selected` or `Transplanted`).
    pub fn transplants(&self) -> u64 {
        self.patients.iter().filter(|p| p.condition.has_transplant()).count() as u64
    }

    pub fn advantaged_transplants(&self) -> u64 {
        self.patients
            .iter()
            .filter(|p| p.advantaged && p.condition.has_transplant())
            .count() as u64
    }

    pub fn advantaged_deceased(&self) -> u64 {
        self.patients
            .iter()
            .filter(|p| p.advantaged && p.condition == Condition::Deceased)
            .count() as u64
    }

    /// Mean months waited by patients who received an organ.
    pub fn average_waiting(&self) -> f64 {
        mean_wait(self.patients.iter().filter(|p| p.condition.has_transplant()))
    }

    /// Mean months waited by advantaged patients who received an organ.
    pub fn average_waiting_advantaged(&self) -> f64 {
        mean_wait(
            self.patients
                .iter()
                .filter(|p| p.advantaged && p.condition.has_transplant()),
        )
    }

    /// Mean wait of transplanted patients, by primary region.
    pub fn primary_waiting_rates(&self) -> Vec<f64> {
        let n = self.region_count();
        let mut count = vec![0u64; n];
        let mut waited = vec![0u64; n];
        for p in self.patients.iter().filter(|p| p.condition.has_transplant()) {
            let r = p.primary().index();
            count[r] += 1;
            waited[r] += p.wait_time as u64;
        }
        count
            .iter()
            .zip(&waited)
            .map(|(&c, &w)| if c == 0 { 0.0 } else { w as f64 / c as f64 })
            .collect()
    }

    /// Deaths while waiting, by primary region.
    pub fn primary_deaths_regional(&self) -> Vec<u64> {
        self.per_primary_region(|p| p.condition == Condition::Deceased)
    }

    /// Patients still waiting, by primary region.
    pub fn primary_wl_regional(&self) -> Vec<u64> {
        self.per_primary_region(|p| p.condition.is_waiting())
    }

    /// Patients who received an organ, by primary region.
    pub fn primary_tx_regional(&self) -> Vec<u64> {
        self.per_primary_region(|p| p.condition.has_transplant())
    }

    /// Collect every report column.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            regions:                   self.config.regions.to_string(),
            advantage_probability:     self.config.advantage_probability,
            seed:                      self.config.seed,
            primary_transplants:       self.primary_center_transplants(),
            alternate_transplants:     self.alternate_center_transplants(),
            transplants:               self.transplants(),
            primary_listings:          self.primary_listings(),
            alternate_listings:        self.alternate_listings(),
            count_waiting:             self.waiting(),
            count_deceased:            self.deceased(),
            count_advantaged_deceased: self.advantaged_deceased(),
            advantaged_transplants:    self.advantaged_transplants(),
            average_wait:              self.average_waiting(),
            death_region:              self.primary_deaths_regional(),
            primary_wl:                self.primary_wl_regional(),
            primary_tx:                self.primary_tx_regional(),
            wait_rates:                self.primary_waiting_rates(),
            advantaged_wait:           self.average_waiting_advantaged(),
            months:                    self.tick().0,
        }
    }

    fn per_primary_region<F>(&self, mut keep: F) -> Vec<u64>
    where
        F: FnMut(&PatientView<'_>) -> bool,
    {
        let mut out = vec![0u64; self.region_count()];
        for p in self.patients.iter() {
            if keep(&p) {
                out[p.primary().index()] += 1;
            }
        }
        out
    }
}

fn mean_wait<'a, I>(patients: I) -> f64
where
    I: Iterator<Item = PatientView<'a>>,
{
    let (count, total) = patients.fold((0u64, 0u64), |(c, t), p| (c + 1, t + p.wait_time as u64));
    if count == 0 { 0.0 } else { total as f64 / count as f64 }
}

//! The `Model` struct and its monthly tick loop.

use tracing::{debug, info};

use wl_core::{PatientId, RegionId, SimRng, Tick, WlResult};
use wl_patient::{Condition, PatientStore};
use wl_region::{RegionQueue, RegistryParams};

use crate::{ConditionCounts, ModelConfig, SimError, SimObserver, SimResult, TickReport};

// ── SelectionVolume ───────────────────────────────────────────────────────────

/// How many patients a region selects in a month.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionVolume {
    /// Poisson draw with the region's monthly transplant rate as mean.
    #[default]
    Poisson,
    /// Exactly the rate, rounded to the nearest whole patient.  No draw is
    /// consumed.
    Expected,
}

impl SelectionVolume {
    pub(crate) fn draw(self, rng: &mut SimRng, rate: f64) -> WlResult<u64> {
        match self {
            SelectionVolume::Poisson => rng.poisson(rate),
            SelectionVolume::Expected => Ok(rate.round().max(0.0) as u64),
        }
    }
}

// ── Tallies ───────────────────────────────────────────────────────────────────

/// Per-region counters, indexed by `RegionId`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Tallies {
    /// Selections made by a region for patients whose primary it is.
    pub primary_transplants:   Vec<u64>,
    /// Selections made by a region for patients listed there as secondary.
    pub alternate_transplants: Vec<u64>,
    /// Patients who arrived with the region as primary.
    pub primary_listings:      Vec<u64>,
    /// Patients who arrived with the region as a secondary listing.
    pub alternate_listings:    Vec<u64>,
}

impl Tallies {
    pub fn new(regions: usize) -> Self {
        Self {
            primary_transplants:   vec![0; regions],
            alternate_transplants: vec![0; regions],
            primary_listings:      vec![0; regions],
            alternate_listings:    vec![0; regions],
        }
    }
}

// ── Model ─────────────────────────────────────────────────────────────────────

/// A single waiting-list simulation run.
///
/// Each call to [`step`](Self::step) simulates one month:
///
/// 1. Every patient takes one lifecycle step, in a freshly shuffled order.
/// 2. Condition counts are appended to [`history`](Self::history).
/// 3. Regions are visited in a freshly shuffled order; each draws its
///    selection volume and scans its queue from the cursor.
/// 4. This month's arrivals are drawn and listed.
/// 5. The month counter advances.
/// 6. The run stops once nobody is waiting or the horizon is passed.
///
/// Create via [`ModelBuilder`][crate::ModelBuilder].
pub struct Model {
    pub config: ModelConfig,

    /// Registry-derived inputs for the selected regions.
    pub params: RegistryParams,

    pub(crate) tick:         Tick,
    pub(crate) running:      bool,
    pub(crate) patients:     PatientStore,
    pub(crate) queues:       Vec<RegionQueue>,
    pub(crate) tallies:      Tallies,
    pub(crate) history:      Vec<ConditionCounts>,
    /// Every patient id, reshuffled at the start of each month.
    pub(crate) activation:   Vec<PatientId>,
    pub(crate) region_order: Vec<RegionId>,
    pub(crate) rng:          SimRng,
    pub(crate) volume:       SelectionVolume,
}

impl Model {
    // ── Public API ────────────────────────────────────────────────────────

    /// Step until the run terminates.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.running {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Run exactly `n` ticks, whether or not the run has terminated.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Simulate one month.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.tick;
        observer.on_tick_start(now);

        self.advance_patients();

        let counts = ConditionCounts::of(&self.patients);
        self.history.push(counts);

        if now.is_year_start() {
            debug!(year = now.year(), waiting = counts.waiting, "model year");
        }

        let selected = self.allocate()?;

        let arrivals = self.rng.poisson(self.params.additional_patients)?;
        self.add_candidates(arrivals, crate::ArrivalKind::Monthly)?;

        observer.on_tick_end(now, &TickReport { counts, selected, arrivals });

        self.tick = self.tick.next();
        if self.running && self.should_stop() {
            self.running = false;
            if self.config.output {
                self.report();
            }
            observer.on_sim_end(self.tick);
        }
        Ok(())
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// Months simulated so far.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// `false` once the run has terminated.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn patients(&self) -> &PatientStore {
        &self.patients
    }

    #[inline]
    pub fn region_count(&self) -> usize {
        self.queues.len()
    }

    /// All region queues, indexed by `RegionId`.
    #[inline]
    pub fn queues(&self) -> &[RegionQueue] {
        &self.queues
    }

    pub fn queue(&self, region: RegionId) -> SimResult<&RegionQueue> {
        self.queues
            .get(region.index())
            .ok_or_else(|| SimError::Config(format!("no queue for {region}")))
    }

    /// Condition counts snapshotted once per month, oldest first.
    #[inline]
    pub fn history(&self) -> &[ConditionCounts] {
        &self.history
    }

    /// Selections per scanning region, primary listings only.
    #[inline]
    pub fn primary_transplants_by_region(&self) -> &[u64] {
        &self.tallies.primary_transplants
    }

    /// Selections per scanning region, secondary listings only.
    #[inline]
    pub fn alternate_transplants_by_region(&self) -> &[u64] {
        &self.tallies.alternate_transplants
    }

    #[inline]
    pub fn primary_listings_by_region(&self) -> &[u64] {
        &self.tallies.primary_listings
    }

    #[inline]
    pub fn alternate_listings_by_region(&self) -> &[u64] {
        &self.tallies.alternate_listings
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn advance_patients(&mut self) {
        self.rng.shuffle(&mut self.activation);
        for &id in &self.activation {
            self.patients.step(id);
        }
    }

    /// Visit every region once in random order and select from its queue.
    /// Returns the number of patients selected.
    fn allocate(&mut self) -> SimResult<u64> {
        self.rng.shuffle(&mut self.region_order);

        let mut total = 0;
        for &region in &self.region_order {
            let r = region.index();
            let wanted = self.volume.draw(&mut self.rng, self.params.transplant_rates[r])?;

            let patients = &mut self.patients;
            let tallies = &mut self.tallies;
            total += self.queues[r].scan(wanted, |id| {
                if !patients.select(id) {
                    return false;
                }
                if patients.primary(id) == region {
                    tallies.primary_transplants[r] += 1;
                } else {
                    tallies.alternate_transplants[r] += 1;
                }
                true
            });
        }
        Ok(total)
    }

    fn should_stop(&self) -> bool {
        self.patients.count(Condition::Waiting) == 0 || self.tick.0 > self.config.months()
    }

    fn report(&self) {
        info!(
            months = self.tick.0,
            primary_transplants = ?self.tallies.primary_transplants,
            alternate_transplants = ?self.tallies.alternate_transplants,
            advantaged_deceased = self.advantaged_deceased(),
            primary_listings = ?self.tallies.primary_listings,
            alternate_listings = ?self.tallies.alternate_listings,
            advantaged_transplants = self.advantaged_transplants(),
            average_wait = self.average_waiting(),
            wait_rates = ?self.primary_waiting_rates(),
            deaths = ?self.primary_deaths_regional(),
            "run complete"
        );
    }
}

//! The arrival process: creating patients and listing them on regions.
//!
//! Draw order per patient is fixed: primary region, advantaged coin,
//! secondary count and regions (if advantaged), then wait and lifespan.

use wl_core::{RegionId, SimRng};
use wl_patient::NewPatient;

use crate::{Model, SimError, SimResult};

/// Initial-list wait brackets in months, `[low, high)`.
pub const WAIT_BRACKETS: [(u32, u32); 8] =
    [(0, 1), (1, 3), (3, 6), (6, 12), (12, 24), (24, 36), (36, 60), (60, 80)];

/// Share of the initial list falling in each of [`WAIT_BRACKETS`].
pub const WAIT_BRACKET_PROBABILITIES: [f64; 8] =
    [0.0411, 0.0665, 0.0825, 0.1368, 0.2004, 0.1409, 0.1830, 0.1488];

/// Upper bound (exclusive) on the number of secondary listings drawn.
pub const MAX_SECONDARY_DRAW: usize = 4;

/// Lifespan redraws allowed before an initial patient is rejected.
pub const LIFESPAN_ATTEMPTS: usize = 10_000;

/// Which batch of patients is being created.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArrivalKind {
    /// The waiting list present at month 0: patients have already waited.
    Initial,
    /// New patients joining during the run, with no wait yet.
    Monthly,
}

// ── Secondary listing ─────────────────────────────────────────────────────────

/// Selection weight of every region as a secondary listing for a patient
/// whose primary is `primary`.  The primary's weight is always 0.
///
/// With `smart` the weight of region `r` is
/// `rates[r] / (queue_lens[r] + 1)`; otherwise every other region weighs 1.
pub fn secondary_weights(
    rates:      &[f64],
    queue_lens: &[usize],
    primary:    RegionId,
    smart:      bool,
) -> Vec<f64> {
    rates
        .iter()
        .zip(queue_lens)
        .enumerate()
        .map(|(r, (&rate, &len))| {
            if r == primary.index() {
                0.0
            } else if smart {
                rate / (len as f64 + 1.0)
            } else {
                1.0
            }
        })
        .collect()
}

/// Draw between one and three distinct secondary regions, without
/// replacement, proportional to `weights`.
///
/// The count is capped by the number of regions with non-zero weight.  An
/// empty result means there was nothing to choose from.  If no region
/// carries weight while others exist the draw is a sampling error.
pub fn draw_secondary_regions(rng: &mut SimRng, weights: &[f64]) -> SimResult<Vec<RegionId>> {
    let candidates = weights.len().saturating_sub(1);
    if candidates == 0 {
        return Ok(Vec::new());
    }

    let wanted: usize = rng.gen_range(1..MAX_SECONDARY_DRAW);
    let eligible = weights.iter().filter(|&&w| w > 0.0).count();
    let count = wanted.min(candidates).min(eligible.max(1));

    rng.weighted_sample(weights, count)?.into_iter().map(region_id).collect()
}

// ── Model::add_candidates ─────────────────────────────────────────────────────

impl Model {
    /// Create `count` patients and list each on its regions.
    pub fn add_candidates(&mut self, count: u64, kind: ArrivalKind) -> SimResult<()> {
        let shares = match kind {
            ArrivalKind::Initial => &self.params.initial_queue_probabilities,
            ArrivalKind::Monthly => &self.params.additional_queue_probabilities,
        };
        let shares = shares.clone();

        for _ in 0..count {
            let primary = region_id(self.rng.categorical(&shares)?)?;
            let mut patient = NewPatient::new(primary);

            if self.rng.gen_bool(self.config.advantage_probability) {
                let lens: Vec<usize> = self.queues.iter().map(|q| q.len()).collect();
                let weights = secondary_weights(
                    &self.params.transplant_rates,
                    &lens,
                    primary,
                    self.config.smart_listing,
                );
                patient = patient.secondaries(draw_secondary_regions(&mut self.rng, &weights)?);
            }

            let (waited, lifespan) = match kind {
                ArrivalKind::Initial => self.draw_initial_history()?,
                ArrivalKind::Monthly => (0, self.draw_lifespan()?),
            };
            patient = patient.waited(waited).lifespan(lifespan);

            let regions = patient.regions().to_vec();
            let id = self.patients.push(patient)?;
            for (i, region) in regions.iter().enumerate() {
                self.queues[region.index()].push(id);
                if i == 0 {
                    self.tallies.primary_listings[region.index()] += 1;
                } else {
                    self.tallies.alternate_listings[region.index()] += 1;
                }
            }
            self.activation.push(id);
        }
        Ok(())
    }

    /// Wait already accrued by a patient on the month-0 list, and a lifespan
    /// that exceeds it.
    fn draw_initial_history(&mut self) -> SimResult<(u32, f64)> {
        let bracket = self.rng.categorical(&WAIT_BRACKET_PROBABILITIES)?;
        let (low, high) = WAIT_BRACKETS[bracket];
        let waited: u32 = self.rng.gen_range(low..high);

        for _ in 0..LIFESPAN_ATTEMPTS {
            let lifespan = self.draw_lifespan()?;
            if lifespan > waited as f64 {
                return Ok((waited, lifespan));
            }
        }
        Err(SimError::Sampling(format!(
            "no lifespan above a wait of {waited} months after {LIFESPAN_ATTEMPTS} draws"
        )))
    }

    fn draw_lifespan(&mut self) -> SimResult<f64> {
        Ok(self.rng.normal(self.config.average_lifespan, self.config.lifespan_std_dev)?)
    }
}

fn region_id(index: usize) -> SimResult<RegionId> {
    RegionId::try_from(index)
        .map_err(|_| SimError::Config(format!("region index {index} out of range")))
}

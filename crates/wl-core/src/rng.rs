//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! Every `Model` owns exactly one `SimRng`, seeded once at construction.
//! All draws (arrival counts, region choices, lifespans, selection volumes,
//! shuffles) go through it in a fixed order, so a given seed and
//! configuration always reproduce the same run.  There is no process-wide
//! random state: independent models on different threads never interfere.

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Normal, Poisson};

use crate::{WlError, WlResult};

/// Simulation-level RNG shared by the whole model instance.
///
/// Used only in single-threaded contexts.  Batch runs on several threads
/// each construct their own `SimRng` from their own seed.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    // ── Distributions ─────────────────────────────────────────────────────

    /// Poisson-distributed count with the given `mean`.
    ///
    /// A mean of exactly zero yields 0 without consuming a draw.  Negative or
    /// non-finite means are a sampling error.
    pub fn poisson(&mut self, mean: f64) -> WlResult<u64> {
        if mean == 0.0 {
            return Ok(0);
        }
        if !mean.is_finite() {
            return Err(WlError::Sampling(format!("poisson mean {mean} is not finite")));
        }
        let dist = Poisson::new(mean)
            .map_err(|e| WlError::Sampling(format!("poisson mean {mean}: {e}")))?;
        let draw: f64 = dist.sample(&mut self.0);
        Ok(draw as u64)
    }

    /// Normally distributed value `N(mean, std_dev²)`.
    ///
    /// A negative or non-finite `std_dev` is a sampling error; zero returns
    /// `mean`.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> WlResult<f64> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(WlError::Sampling(format!("normal std {std_dev} must be finite and >= 0")));
        }
        let dist = Normal::new(mean, std_dev).map_err(|e| {
            WlError::Sampling(format!("normal(mean {mean}, std {std_dev}): {e}"))
        })?;
        Ok(dist.sample(&mut self.0))
    }

    /// Draw an index from the categorical distribution proportional to
    /// `weights`.
    ///
    /// Weights need not be normalised.  An empty slice, a negative or
    /// non-finite weight, or weights summing to zero are sampling errors.
    pub fn categorical(&mut self, weights: &[f64]) -> WlResult<usize> {
        let dist = WeightedIndex::<f64>::new(weights).map_err(weighted_error)?;
        Ok(dist.sample(&mut self.0))
    }

    /// Draw `count` distinct indices without replacement, each draw
    /// proportional to the remaining `weights`.
    ///
    /// Draws are sequential: after each pick that index's weight is zeroed
    /// and the rest renormalised.  Fails if fewer than `count` indices carry
    /// non-zero weight.
    pub fn weighted_sample(&mut self, weights: &[f64], count: usize) -> WlResult<Vec<usize>> {
        let mut remaining = weights.to_vec();
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            let i = self.categorical(&remaining)?;
            remaining[i] = 0.0;
            picked.push(i);
        }
        Ok(picked)
    }
}

fn weighted_error(e: WeightedError) -> WlError {
    match e {
        WeightedError::AllWeightsZero => {
            WlError::Sampling("probability weights sum to zero".into())
        }
        WeightedError::NoItem => WlError::Sampling("no candidates to sample from".into()),
        other => WlError::Sampling(other.to_string()),
    }
}

//! Run configuration.

use wl_core::months_for_years;
use wl_region::RegionSelector;

use crate::{SimError, SimResult};

/// Standard deviation, in months, of the lifespan distribution.
pub const DEFAULT_LIFESPAN_STD_DEV: f64 = 5.0;

/// Parameters of a single model run.
///
/// Registry-derived inputs (rates, shares, list sizes) are not here: they
/// come from a [`wl_region::ParameterProvider`] for the selected `regions`.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    /// Regions taking part in the run.
    pub regions: RegionSelector,

    /// Probability that an arriving patient lists on extra regions.
    pub advantage_probability: f64,

    /// Log a summary report when the run terminates.
    pub output: bool,

    /// Mean of the lifespan distribution, in months.
    pub average_lifespan: f64,

    pub lifespan_std_dev: f64,

    /// Run horizon.  The run stops once the month counter exceeds
    /// `years * 12`, or earlier if nobody is left waiting.
    pub years: u32,

    /// Choose secondary regions by transplant rate over queue length
    /// instead of uniformly.
    pub smart_listing: bool,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            regions:               RegionSelector::All,
            advantage_probability: 0.05,
            output:                false,
            average_lifespan:      98.0,
            lifespan_std_dev:      DEFAULT_LIFESPAN_STD_DEV,
            years:                 20,
            smart_listing:         true,
            seed:                  42,
        }
    }
}

impl ModelConfig {
    /// Horizon in months.
    #[inline]
    pub fn months(&self) -> u64 {
        months_for_years(self.years)
    }

    pub fn validate(&self) -> SimResult<()> {
        let p = self.advantage_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(SimError::Config(format!(
                "advantage probability must be within [0, 1], got {p}"
            )));
        }
        if !self.average_lifespan.is_finite() || self.average_lifespan <= 0.0 {
            return Err(SimError::Config(format!(
                "average lifespan must be a positive number of months, got {}",
                self.average_lifespan
            )));
        }
        if !self.lifespan_std_dev.is_finite() || self.lifespan_std_dev < 0.0 {
            return Err(SimError::Config(format!(
                "lifespan standard deviation must be non-negative, got {}",
                self.lifespan_std_dev
            )));
        }
        Ok(())
    }
}

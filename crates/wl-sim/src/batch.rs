//! Batch harness: the same configuration run under several seeds.

use tracing::info;

use wl_region::{ParameterProvider, RegistryParams};

use crate::{ModelBuilder, ModelConfig, NoopObserver, RunSummary, SimResult};

/// Runs per batch when no seed list is given.
pub const DEFAULT_RUNS: usize = 5;

/// Distance between consecutive default seeds.
pub const SEED_STRIDE: u64 = 100;

/// One configuration and the seeds to run it under.
///
/// `config.seed` is ignored: every run takes its seed from `seeds`.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchPlan {
    pub config: ModelConfig,
    pub seeds:  Vec<u64>,
}

impl BatchPlan {
    pub fn new(config: ModelConfig, seeds: Vec<u64>) -> Self {
        Self { config, seeds }
    }

    /// `runs` seeds spaced [`SEED_STRIDE`] apart, starting at `base`.
    pub fn default_seeds(base: u64, runs: usize) -> Vec<u64> {
        (0..runs as u64)
            .map(|k| base.wrapping_add(k.wrapping_mul(SEED_STRIDE)))
            .collect()
    }
}

/// Run every seed of `plan` to termination and return one summary per seed,
/// in seed order.
///
/// Parameters are resolved once.  With the `parallel` Cargo feature runs are
/// spread over Rayon's thread pool; each owns its own model and generator,
/// so results do not depend on scheduling.
pub fn run_batch<P>(provider: &P, plan: &BatchPlan) -> SimResult<Vec<RunSummary>>
where
    P: ParameterProvider + ?Sized,
{
    let params = provider.params(&plan.config.regions)?;
    info!(
        regions = %plan.config.regions,
        advantage_probability = plan.config.advantage_probability,
        runs = plan.seeds.len(),
        "starting batch"
    );

    #[cfg(not(feature = "parallel"))]
    {
        plan.seeds
            .iter()
            .map(|&seed| run_one(&params, &plan.config, seed))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        plan.seeds
            .par_iter()
            .map(|&seed| run_one(&params, &plan.config, seed))
            .collect()
    }
}

fn run_one(params: &RegistryParams, config: &ModelConfig, seed: u64) -> SimResult<RunSummary> {
    let mut model = ModelBuilder::new(params.clone())
        .config(config.clone())
        .seed(seed)
        .build()?;
    model.run(&mut NoopObserver)?;
    Ok(model.summary())
}

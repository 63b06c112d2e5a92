//! Fluent builder for constructing a [`Model`].

use tracing::{info, warn};

use wl_core::{RegionId, SimRng, Tick};
use wl_patient::PatientStore;
use wl_region::{ParameterProvider, RegionQueue, RegistryParams};

use crate::model::Tallies;
use crate::{ArrivalKind, Model, ModelConfig, SelectionVolume, SimError, SimResult};

/// Fluent builder for [`Model`].
///
/// # Required inputs
///
/// - [`RegistryParams`] for the selected regions, either directly or
///   resolved through a [`ParameterProvider`] with
///   [`from_provider`](Self::from_provider).
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                    |
/// |----------------------------|----------------------------|
/// | `.config(c)`               | `ModelConfig::default()`   |
/// | `.seed(s)`                 | config seed (42)           |
/// | `.advantage_probability(p)`| config value (0.05)        |
/// | `.selection_volume(v)`     | `SelectionVolume::Poisson` |
///
/// # Example
///
/// ```rust,ignore
/// let table = load_registry_csv(Path::new("registry.csv"))?;
/// let mut model = ModelBuilder::from_provider(&table, ModelConfig::default())?
///     .seed(7)
///     .build()?;
/// model.run(&mut NoopObserver)?;
/// ```
pub struct ModelBuilder {
    params: RegistryParams,
    config: ModelConfig,
    volume: SelectionVolume,
}

impl ModelBuilder {
    pub fn new(params: RegistryParams) -> Self {
        Self { params, config: ModelConfig::default(), volume: SelectionVolume::default() }
    }

    /// Resolve `config.regions` through `provider`.
    pub fn from_provider<P: ParameterProvider + ?Sized>(
        provider: &P,
        config:   ModelConfig,
    ) -> SimResult<Self> {
        let params = provider.params(&config.regions)?;
        Ok(Self::new(params).config(config))
    }

    pub fn config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn advantage_probability(mut self, p: f64) -> Self {
        self.config.advantage_probability = p;
        self
    }

    pub fn smart_listing(mut self, enabled: bool) -> Self {
        self.config.smart_listing = enabled;
        self
    }

    pub fn years(mut self, years: u32) -> Self {
        self.config.years = years;
        self
    }

    pub fn average_lifespan(mut self, months: f64) -> Self {
        self.config.average_lifespan = months;
        self
    }

    pub fn output(mut self, enabled: bool) -> Self {
        self.config.output = enabled;
        self
    }

    pub fn selection_volume(mut self, volume: SelectionVolume) -> Self {
        self.volume = volume;
        self
    }

    /// Validate inputs, list the initial waiting list and return a
    /// ready-to-run [`Model`].
    pub fn build(self) -> SimResult<Model> {
        self.config.validate()?;
        self.params.validate()?;

        let n = self.params.region_count();
        let initial = usize::try_from(self.params.initial_patients)
            .map_err(|_| SimError::Config("initial waiting list too large".into()))?;

        info!(
            advantage_probability = self.config.advantage_probability,
            regions = n,
            seed = self.config.seed,
            "running model"
        );
        if n == 1 && self.config.advantage_probability > 0.0 {
            warn!("a single region is selected; no patient can be multiply listed");
        }

        let region_order = (0..n)
            .map(|r| {
                RegionId::try_from(r)
                    .map_err(|_| SimError::Config(format!("region index {r} out of range")))
            })
            .collect::<SimResult<Vec<_>>>()?;

        let mut model = Model {
            queues:       region_order.iter().map(|&r| RegionQueue::new(r)).collect(),
            tallies:      Tallies::new(n),
            tick:         Tick::ZERO,
            running:      false,
            patients:     PatientStore::with_capacity(initial),
            history:      Vec::new(),
            activation:   Vec::with_capacity(initial),
            region_order,
            rng:          SimRng::new(self.config.seed),
            volume:       self.volume,
            config:       self.config,
            params:       self.params,
        };

        let initial_patients = model.params.initial_patients;
        model.add_candidates(initial_patients, ArrivalKind::Initial)?;
        model.running = true;
        Ok(model)
    }
}

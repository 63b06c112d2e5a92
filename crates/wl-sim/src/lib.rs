//! `wl-sim` — the waiting-list model and its monthly tick loop.
//!
//! # Monthly tick
//!
//! ```text
//! for each month until nobody waits or the horizon passes:
//!   ① Lifecycle — every patient steps once, in shuffled order
//!                 (Waiting: wait += 1; Selected → Transplanted;
//!                  Waiting with wait ≥ lifespan → Deceased).
//!   ② Snapshot  — condition counts appended to the history.
//!   ③ Allocate  — regions in shuffled order draw a Poisson volume and
//!                 select that many Waiting patients from their queue.
//!   ④ Arrivals  — a Poisson number of new patients are listed.
//!   ⑤ Advance   — month counter += 1; check termination.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the seeds of a batch on Rayon's thread pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wl_region::load_registry_csv;
//! use wl_sim::{ModelBuilder, ModelConfig, NoopObserver};
//!
//! let table = load_registry_csv(Path::new("registry.csv"))?;
//! let mut model = ModelBuilder::from_provider(&table, ModelConfig::default())?.build()?;
//! model.run(&mut NoopObserver)?;
//! println!("{} transplants", model.transplants());
//! ```

pub mod arrivals;
pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod observer;
pub mod stats;

#[cfg(test)]
mod tests;

pub use arrivals::{ArrivalKind, draw_secondary_regions, secondary_weights};
pub use batch::{BatchPlan, DEFAULT_RUNS, SEED_STRIDE, run_batch};
pub use builder::ModelBuilder;
pub use config::{DEFAULT_LIFESPAN_STD_DEV, ModelConfig};
pub use error::{SimError, SimResult};
pub use model::{Model, SelectionVolume};
pub use observer::{NoopObserver, SimObserver, TickReport};
pub use stats::{ConditionCounts, RunSummary};

//! `wl-region` — allocation regions: waiting queues and their parameters.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`queue`]     | `RegionQueue` (FIFO of `PatientId` + persistent cursor)   |
//! | [`params`]    | `RegistryRecord`, `RegistryParams` (validated model inputs) |
//! | [`selector`]  | `RegionSelector` (`"ALL"` or `"CAOP,ILIP,…"`)             |
//! | [`provider`]  | `ParameterProvider` trait, `RegistryTable`                |
//! | [`loader`]    | `load_registry_csv`, `load_registry_reader`               |
//! | [`error`]     | `RegionError`, `RegionResult<T>`                          |
//!
//! # Parameter derivation (summary)
//!
//! For the selected regions, in selector order:
//!
//! ```text
//! transplant_rate[r]      = transplants[r] / 12
//! initial_share[r]        = waiting_list[r] / Σ waiting_list
//! additional_share[r]     = additions[r] / Σ additions
//! initial_patients        = Σ waiting_list
//! additional_patients     = Σ (additions − ignored_removals) / 12
//! ```

pub mod error;
pub mod loader;
pub mod params;
pub mod provider;
pub mod queue;
pub mod selector;


pub use error::{RegionError, RegionResult};
pub use loader::{load_registry_csv, load_registry_reader};
pub use params::{PROBABILITY_TOLERANCE, RegistryParams, RegistryRecord};
pub use provider::{ParameterProvider, RegistryTable};
pub use queue::RegionQueue;
pub use selector::RegionSelector;

//! `wl-core` — foundational types for the `waitlist` transplant simulation.
//!
//! This crate is a dependency of every other `wl-*` crate.  It intentionally
//! has no `wl-*` dependencies and minimal external ones (`rand`,
//! `rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PatientId`, `RegionId`                               |
//! | [`time`]        | `Tick` (one simulated month), year/month helpers      |
//! | [`rng`]         | `SimRng` (one seeded generator per model)             |
//! | [`error`]       | `WlError`, `WlResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{WlError, WlResult};
pub use ids::{PatientId, RegionId};
pub use rng::SimRng;
pub use time::{MONTHS_PER_YEAR, Tick, months_for_years};

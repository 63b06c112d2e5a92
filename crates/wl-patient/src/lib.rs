//! `wl-patient` — patient records for the `waitlist` simulation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`condition`]   | `Condition` state machine, `Transition`                   |
//! | [`store`]       | `PatientStore` (SoA arena), `PatientView`                 |
//! | [`builder`]     | `NewPatient` (fluent construction of one arrival)         |
//! | [`error`]       | `PatientError`, `PatientResult<T>`                        |
//!
//! # Shared membership
//!
//! A patient listed on several regions is stored exactly once in the arena.
//! Region queues hold `PatientId`s, so a condition change made through one
//! queue is what every other queue observes on its next read.

pub mod builder;
pub mod condition;
pub mod error;
pub mod store;


pub use builder::NewPatient;
pub use condition::{Condition, Transition};
pub use error::{PatientError, PatientResult};
pub use store::{PatientStore, PatientView};

//! Fluent construction of a single arriving patient.
//!
//! # Usage
//!
//! ```rust
//! use wl_core::RegionId;
//! use wl_patient::{NewPatient, PatientStore};
//!
//! let mut store = PatientStore::new();
//! let id = store
//!     .push(
//!         NewPatient::new(RegionId(0))
//!             .secondary(RegionId(3))
//!             .lifespan(91.5)
//!             .waited(12),
//!     )
//!     .unwrap();
//!
//! assert!(store.is_advantaged(id));
//! assert_eq!(store.primary(id), RegionId(0));
//! ```

use wl_core::RegionId;

use crate::{PatientError, PatientResult};

/// Everything needed to create a patient, checked by
/// [`PatientStore::push`][crate::PatientStore::push].
///
/// The first region passed to [`new`](Self::new) is the primary listing.
/// Defaults: no prior wait, infinite lifespan.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPatient {
    pub(crate) regions:   Vec<RegionId>,
    pub(crate) lifespan:  f64,
    pub(crate) wait_time: u32,
}

impl NewPatient {
    pub fn new(primary: RegionId) -> Self {
        Self {
            regions:   vec![primary],
            lifespan:  f64::INFINITY,
            wait_time: 0,
        }
    }

    /// Add one secondary (alternate) listing.
    pub fn secondary(mut self, region: RegionId) -> Self {
        self.regions.push(region);
        self
    }

    /// Add several secondary listings in order.
    pub fn secondaries<I: IntoIterator<Item = RegionId>>(mut self, regions: I) -> Self {
        self.regions.extend(regions);
        self
    }

    /// Months the patient can survive while waiting.
    pub fn lifespan(mut self, months: f64) -> Self {
        self.lifespan = months;
        self
    }

    /// Months already spent on the list before entering the simulation.
    pub fn waited(mut self, months: u32) -> Self {
        self.wait_time = months;
        self
    }

    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    pub(crate) fn validate(&self) -> PatientResult<()> {
        // Infinity is allowed: it models "never dies while waiting".
        if self.lifespan.is_nan() {
            return Err(PatientError::InvalidLifespan(self.lifespan));
        }
        for (i, r) in self.regions.iter().enumerate() {
            if self.regions[..i].contains(r) {
                return Err(PatientError::DuplicateRegion { region: *r });
            }
        }
        Ok(())
    }
}

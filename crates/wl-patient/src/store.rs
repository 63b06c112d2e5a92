//! Patient arena: `PatientStore` holds every patient ever created.
//!
//! # Layout
//!
//! Structure-of-Arrays, indexed by `PatientId`:
//!
//! ```ignore
//! let waited = store.wait_time(id);          // O(1), cache-friendly
//! let regions = store.regions(id);           // slice into a flat buffer
//! ```
//!
//! Region memberships are kept in one flat `Vec<RegionId>` with a per-patient
//! offset table, so a patient listed on four regions costs four `u16`s and no
//! per-patient allocation.
//!
//! Patients are never removed.  The only mutations are the ones the lifecycle
//! allows: [`PatientStore::select`] and [`PatientStore::step`].

use wl_core::{PatientId, RegionId};

use crate::{Condition, NewPatient, PatientError, PatientResult, Transition};

/// Read-only view of one patient's record.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PatientView<'a> {
    pub id:         PatientId,
    pub condition:  Condition,
    pub wait_time:  u32,
    pub lifespan:   f64,
    pub advantaged: bool,
    /// `regions[0]` is the primary region; the rest are secondary listings.
    pub regions:    &'a [RegionId],
}

impl PatientView<'_> {
    #[inline]
    pub fn primary(&self) -> RegionId {
        self.regions[0]
    }
}

/// Structure-of-Arrays storage for all patient state.
///
/// Every per-patient `Vec` has exactly `len()` elements; `region_offsets`
/// has `len() + 1`.
#[derive(Clone, Debug)]
pub struct PatientStore {
    condition:      Vec<Condition>,
    wait_time:      Vec<u32>,
    lifespan:       Vec<f64>,
    advantaged:     Vec<bool>,
    region_offsets: Vec<u32>,
    region_ids:     Vec<RegionId>,
}

impl Default for PatientStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientStore {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate for `capacity` patients (e.g. the initial list size).
    pub fn with_capacity(capacity: usize) -> Self {
        let mut region_offsets = Vec::with_capacity(capacity + 1);
        region_offsets.push(0);
        Self {
            condition: Vec::with_capacity(capacity),
            wait_time: Vec::with_capacity(capacity),
            lifespan: Vec::with_capacity(capacity),
            advantaged: Vec::with_capacity(capacity),
            region_offsets,
            region_ids: Vec::with_capacity(capacity),
        }
    }

    /// Number of patients ever created.
    #[inline]
    pub fn len(&self) -> usize {
        self.condition.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.condition.is_empty()
    }

    /// Iterator over all `PatientId`s in creation order.
    pub fn ids(&self) -> impl Iterator<Item = PatientId> + '_ {
        (0..self.len() as u32).map(PatientId)
    }

    /// Iterator over every patient record in creation order.
    pub fn iter(&self) -> impl Iterator<Item = PatientView<'_>> + '_ {
        self.ids().map(|id| self.view(id))
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Append a patient and return its id.
    ///
    /// The new patient starts `Waiting`.  `advantaged` is derived here, once,
    /// from the number of listed regions.
    pub fn push(&mut self, patient: NewPatient) -> PatientResult<PatientId> {
        patient.validate()?;
        let id = PatientId::try_from(self.len()).map_err(|_| PatientError::ArenaFull)?;

        self.condition.push(Condition::Waiting);
        self.wait_time.push(patient.wait_time);
        self.lifespan.push(patient.lifespan);
        self.advantaged.push(patient.regions.len() > 1);
        self.region_ids.extend_from_slice(&patient.regions);
        self.region_offsets.push(self.region_ids.len() as u32);

        Ok(id)
    }

    // ── Read access ───────────────────────────────────────────────────────

    fn view(&self, id: PatientId) -> PatientView<'_> {
        let i = id.index();
        PatientView {
            id,
            condition:  self.condition[i],
            wait_time:  self.wait_time[i],
            lifespan:   self.lifespan[i],
            advantaged: self.advantaged[i],
            regions:    self.regions(id),
        }
    }

    #[inline]
    pub fn condition(&self, id: PatientId) -> Condition {
        self.condition[id.index()]
    }

    /// Condition of every patient, indexed by `PatientId`.
    #[inline]
    pub fn conditions(&self) -> &[Condition] {
        &self.condition
    }

    #[inline]
    pub fn wait_time(&self, id: PatientId) -> u32 {
        self.wait_time[id.index()]
    }

    #[inline]
    pub fn lifespan(&self, id: PatientId) -> f64 {
        self.lifespan[id.index()]
    }

    #[inline]
    pub fn is_advantaged(&self, id: PatientId) -> bool {
        self.advantaged[id.index()]
    }

    /// All regions the patient is listed on, primary first.
    #[inline]
    pub fn regions(&self, id: PatientId) -> &[RegionId] {
        let i = id.index();
        let start = self.region_offsets[i] as usize;
        let end = self.region_offsets[i + 1] as usize;
        &self.region_ids[start..end]
    }

    #[inline]
    pub fn primary(&self, id: PatientId) -> RegionId {
        self.region_ids[self.region_offsets[id.index()] as usize]
    }

    /// Number of patients currently in `condition`.
    pub fn count(&self, condition: Condition) -> usize {
        self.condition.iter().filter(|&&c| c == condition).count()
    }

    // ── Lifecycle mutations ───────────────────────────────────────────────

    /// Mark a `Waiting` patient as `Selected`.
    ///
    /// Returns `false` (and changes nothing) for any other condition, so a
    /// patient already resolved through another region's queue is skipped.
    pub fn select(&mut self, id: PatientId) -> bool {
        let c = &mut self.condition[id.index()];
        if c.is_waiting() {
            *c = Condition::Selected;
            true
        } else {
            false
        }
    }

    /// Apply one month of the lifecycle to a patient.
    ///
    /// In priority order:
    /// 1. `Waiting` patients accrue one month of wait time.
    /// 2. `Selected` becomes `Transplanted`.
    /// 3. Otherwise a `Waiting` patient whose wait reached their lifespan
    ///    becomes `Deceased`.
    ///
    /// Returns the transition taken, if any.
    pub fn step(&mut self, id: PatientId) -> Option<Transition> {
        let i = id.index();
        let from = self.condition[i];

        if from.is_waiting() {
            self.wait_time[i] += 1;
        }

        let to = match from {
            Condition::Selected => Condition::Transplanted,
            Condition::Waiting if self.wait_time[i] as f64 >= self.lifespan[i] => {
                Condition::Deceased
            }
            _ => return None,
        };
        self.condition[i] = to;
        Some(Transition { from, to })
    }
}

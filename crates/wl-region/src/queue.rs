//! `RegionQueue` — one region's waiting list.
//!
//! # Cursor
//!
//! Queues only ever grow: a patient stays in every queue they were listed
//! on after they are selected, transplanted or deceased.  Each queue keeps
//! a cursor at the first entry no scan has inspected yet.  A scan starts at
//! the cursor and moves it forward one slot per inspected entry, whether
//! that entry was still `Waiting` or not, so resolved prefixes are never
//! rescanned.
//!
//! A consequence: a patient selected through region A this tick and then
//! inspected by region B's scan has used up their slot in B as well.

use wl_core::{PatientId, RegionId};

/// FIFO waiting list for one region, in arrival order.
#[derive(Clone, Debug)]
pub struct RegionQueue {
    region:  RegionId,
    entries: Vec<PatientId>,
    cursor:  usize,
}

impl RegionQueue {
    pub fn new(region: RegionId) -> Self {
        Self { region, entries: Vec::new(), cursor: 0 }
    }

    #[inline]
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Append a newly listed patient at the back of the queue.
    #[inline]
    pub fn push(&mut self, patient: PatientId) {
        self.entries.push(patient);
    }

    /// Total entries ever listed, including resolved patients.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first entry not yet inspected.  Never decreases and
    /// never exceeds `len()`.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All entries in arrival order.
    #[inline]
    pub fn entries(&self) -> &[PatientId] {
        &self.entries
    }

    /// Scan forward from the cursor, offering each entry to `try_select`,
    /// until `wanted` entries were accepted or the queue is exhausted.
    ///
    /// `try_select` returns `true` if it selected the patient (i.e. they were
    /// still waiting).  The cursor advances past every inspected entry.
    /// Returns the number of entries accepted.
    pub fn scan<F>(&mut self, wanted: u64, mut try_select: F) -> u64
    where
        F: FnMut(PatientId) -> bool,
    {
        let mut selected = 0;
        while selected < wanted && self.cursor < self.entries.len() {
            let patient = self.entries[self.cursor];
            self.cursor += 1;
            if try_select(patient) {
                selected += 1;
            }
        }
        selected
    }
}

//! The per-patient state machine.
//!
//! ```text
//! Waiting ──select──▶ Selected ──next tick──▶ Transplanted
//!    │
//!    └──wait_time ≥ lifespan──▶ Deceased
//! ```
//!
//! `Transplanted` and `Deceased` are terminal.  No other edge exists, and
//! [`Condition::can_become`] is the single place that encodes the graph.

use std::fmt;

/// Where a patient is in the waiting-list lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    #[default]
    Waiting,
    /// Chosen by a region scan; becomes `Transplanted` on the next tick.
    Selected,
    Transplanted,
    Deceased,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::Waiting,
        Condition::Selected,
        Condition::Transplanted,
        Condition::Deceased,
    ];

    #[inline]
    pub fn is_waiting(self) -> bool {
        self == Condition::Waiting
    }

    /// `Selected` or `Transplanted`: the patient has an organ allocated.
    #[inline]
    pub fn has_transplant(self) -> bool {
        matches!(self, Condition::Selected | Condition::Transplanted)
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Condition::Transplanted | Condition::Deceased)
    }

    /// `true` if `self → next` is an edge of the lifecycle graph.
    pub fn can_become(self, next: Condition) -> bool {
        matches!(
            (self, next),
            (Condition::Waiting, Condition::Selected)
                | (Condition::Waiting, Condition::Deceased)
                | (Condition::Selected, Condition::Transplanted)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Waiting => "Waiting",
            Condition::Selected => "Selected",
            Condition::Transplanted => "Transplanted",
            Condition::Deceased => "Deceased",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A condition change produced by one per-tick update.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Transition {
    pub from: Condition,
    pub to:   Condition,
}

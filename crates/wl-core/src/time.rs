//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter where one tick is one
//! simulated month.  Run horizons are configured in years and converted once
//! with [`months_for_years`]; after that all arithmetic is exact integer
//! month counting.

use std::fmt;

/// Months in a simulated year.
pub const MONTHS_PER_YEAR: u64 = 12;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation month counter, 0-based.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Whole simulated years elapsed at this tick.
    #[inline]
    pub fn year(self) -> u64 {
        self.0 / MONTHS_PER_YEAR
    }

    /// `true` on the first month of each simulated year (including tick 0).
    #[inline]
    pub fn is_year_start(self) -> bool {
        self.0.is_multiple_of(MONTHS_PER_YEAR)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

/// Convert a horizon in years to months.
#[inline]
pub fn months_for_years(years: u32) -> u64 {
    years as u64 * MONTHS_PER_YEAR
}

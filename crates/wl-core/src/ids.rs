//! Patient and region identifiers.
//!
//! Both are dense indices: patients are numbered in creation order and
//! regions in registry order, so either one indexes straight into a `Vec`
//! through [`PatientId::index`] / [`RegionId::index`].

use std::fmt;

/// Position of a patient in the `PatientStore` arena.  Assigned in creation
/// order, so ids are unique and monotonically increasing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatientId(pub u32);

/// Position of an allocation region (a DSA) in the parameter table.
/// The national registry has fewer than 100 DSAs, so `u16` is plenty.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionId(pub u16);

impl PatientId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl RegionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fails once the arena holds `u32::MAX` patients.
impl TryFrom<usize> for PatientId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        u32::try_from(n).map(PatientId)
    }
}

impl TryFrom<usize> for RegionId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        u16::try_from(n).map(RegionId)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "patient #{}", self.0)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region #{}", self.0)
    }
}

//! The `ParameterProvider` seam between registry data and the model.

use crate::{RegionError, RegionResult, RegionSelector, RegistryParams, RegistryRecord};

/// Source of per-region model parameters.
///
/// Pure data lookup: implementations hold no simulation state.  The default
/// [`params`](Self::params) derives [`RegistryParams`] from
/// [`records`](Self::records); override it to supply parameters directly.
pub trait ParameterProvider {
    /// Every region the provider knows about, in registry order.
    fn records(&self) -> &[RegistryRecord];

    /// Region codes in registry order.
    fn all_codes(&self) -> Vec<String> {
        self.records().iter().map(|r| r.dsa.clone()).collect()
    }

    /// Parameters for the selected regions.
    ///
    /// `All` keeps registry order; an explicit list keeps the list's order,
    /// so region index `i` always refers to the `i`-th selected code.
    fn params(&self, selector: &RegionSelector) -> RegionResult<RegistryParams> {
        let records = self.records();
        let selected: Vec<&RegistryRecord> = match selector {
            RegionSelector::All => records.iter().collect(),
            RegionSelector::Codes(codes) => codes
                .iter()
                .map(|code| {
                    records
                        .iter()
                        .find(|r| &r.dsa == code)
                        .ok_or_else(|| RegionError::UnknownRegion(code.clone()))
                })
                .collect::<RegionResult<_>>()?,
        };
        RegistryParams::from_records(&selected)
    }
}

/// In-memory registry: the standard [`ParameterProvider`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistryTable {
    records: Vec<RegistryRecord>,
}

impl RegistryTable {
    /// Build from records.  Region codes must be unique.
    pub fn new(records: Vec<RegistryRecord>) -> RegionResult<Self> {
        for (i, r) in records.iter().enumerate() {
            if records[..i].iter().any(|o| o.dsa == r.dsa) {
                return Err(RegionError::Parse(format!("duplicate region code {:?}", r.dsa)));
            }
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ParameterProvider for RegistryTable {
    fn records(&self) -> &[RegistryRecord] {
        &self.records
    }
}

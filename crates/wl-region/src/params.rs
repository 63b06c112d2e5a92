//! Registry records and the validated parameters a model is built from.

use crate::{RegionError, RegionResult};

/// Allowed deviation of a probability vector's sum from 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

const MONTHS_PER_YEAR: f64 = 12.0;

// ── RegistryRecord ────────────────────────────────────────────────────────────

/// One region's yearly aggregate statistics, as read from the registry CSV.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistryRecord {
    /// Region code (e.g. `"CAOP"`).
    pub dsa:              String,
    /// Deceased-donor transplants performed in the year.
    pub transplants:      f64,
    /// Candidates added to the waiting list in the year.
    pub additions:        f64,
    /// Removals for reasons the model does not represent (living donor,
    /// transplanted abroad, condition improved, …).
    pub ignored_removals: f64,
    /// Candidates on the waiting list at the snapshot date.
    pub waiting_list:     u64,
}

// ── RegistryParams ────────────────────────────────────────────────────────────

/// Per-region parameters consumed by the model at construction.
///
/// All vectors are indexed by `RegionId` and have the same length as
/// `codes`.  Use [`validate`](Self::validate) before trusting hand-built
/// values; [`from_records`](Self::from_records) validates on the way out.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistryParams {
    pub codes:                          Vec<String>,
    /// Expected transplants per month.
    pub transplant_rates:               Vec<f64>,
    /// Share of the initial waiting list per region.  Sums to 1.
    pub initial_queue_probabilities:    Vec<f64>,
    /// Share of new monthly arrivals per region.  Sums to 1.
    pub additional_queue_probabilities: Vec<f64>,
    /// Size of the waiting list at tick 0.
    pub initial_patients:               u64,
    /// Expected new patients per month.
    pub additional_patients:            f64,
}

impl RegistryParams {
    /// Derive monthly parameters from yearly records, in the given order.
    pub fn from_records(records: &[&RegistryRecord]) -> RegionResult<Self> {
        if records.is_empty() {
            return Err(RegionError::Config("no regions selected".into()));
        }

        let wl_total: u64 = records.iter().map(|r| r.waiting_list).sum();
        let add_total: f64 = records.iter().map(|r| r.additions).sum();
        if wl_total == 0 {
            return Err(RegionError::Config("selected regions have an empty waiting list".into()));
        }
        if add_total.is_nan() || add_total <= 0.0 {
            return Err(RegionError::Config("selected regions have no yearly additions".into()));
        }

        let params = Self {
            codes: records.iter().map(|r| r.dsa.clone()).collect(),
            transplant_rates: records
                .iter()
                .map(|r| r.transplants / MONTHS_PER_YEAR)
                .collect(),
            initial_queue_probabilities: records
                .iter()
                .map(|r| r.waiting_list as f64 / wl_total as f64)
                .collect(),
            additional_queue_probabilities: records
                .iter()
                .map(|r| r.additions / add_total)
                .collect(),
            initial_patients: wl_total,
            additional_patients: records
                .iter()
                .map(|r| r.additions - r.ignored_removals)
                .sum::<f64>()
                / MONTHS_PER_YEAR,
        };
        params.validate()?;
        Ok(params)
    }

    #[inline]
    pub fn region_count(&self) -> usize {
        self.codes.len()
    }

    /// Check lengths, signs and normalisation.  Never rescales.
    pub fn validate(&self) -> RegionResult<()> {
        let n = self.codes.len();
        if n == 0 {
            return Err(RegionError::Config("no regions".into()));
        }
        if n > u16::MAX as usize {
            return Err(RegionError::Config(format!("{n} regions exceeds the supported maximum")));
        }

        check_len("transplant rates", &self.transplant_rates, n)?;
        check_len("initial queue probabilities", &self.initial_queue_probabilities, n)?;
        check_len("additional queue probabilities", &self.additional_queue_probabilities, n)?;

        check_non_negative("transplant rates", &self.transplant_rates)?;
        check_distribution("initial queue probabilities", &self.initial_queue_probabilities)?;
        check_distribution("additional queue probabilities", &self.additional_queue_probabilities)?;

        if !self.additional_patients.is_finite() || self.additional_patients < 0.0 {
            return Err(RegionError::Config(format!(
                "additional patients per month must be a non-negative number, got {}",
                self.additional_patients
            )));
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn check_len(what: &str, v: &[f64], expected: usize) -> RegionResult<()> {
    if v.len() != expected {
        return Err(RegionError::Config(format!(
            "{what}: length {} does not match region count {expected}",
            v.len()
        )));
    }
    Ok(())
}

fn check_non_negative(what: &str, v: &[f64]) -> RegionResult<()> {
    match v.iter().position(|x| !x.is_finite() || *x < 0.0) {
        Some(i) => Err(RegionError::Config(format!(
            "{what}: entry {i} is {}, expected a non-negative number",
            v[i]
        ))),
        None => Ok(()),
    }
}

fn check_distribution(what: &str, v: &[f64]) -> RegionResult<()> {
    check_non_negative(what, v)?;
    let sum: f64 = v.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(RegionError::Config(format!("{what}: sum is {sum}, expected 1")));
    }
    Ok(())
}

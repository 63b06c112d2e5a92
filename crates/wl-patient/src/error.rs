use thiserror::Error;

use wl_core::RegionId;

#[derive(Debug, Error)]
pub enum PatientError {
    #[error("{region} listed more than once for a new patient")]
    DuplicateRegion { region: RegionId },

    #[error("lifespan {0} is not a number of months")]
    InvalidLifespan(f64),

    #[error("patient arena is full")]
    ArenaFull,
}

pub type PatientResult<T> = Result<T, PatientError>;

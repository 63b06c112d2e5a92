use thiserror::Error;

use wl_core::WlError;
use wl_patient::PatientError;
use wl_region::RegionError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("model configuration error: {0}")]
    Config(String),

    #[error("sampling error: {0}")]
    Sampling(String),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Patient(#[from] PatientError),
}

impl From<WlError> for SimError {
    fn from(e: WlError) -> Self {
        match e {
            WlError::Sampling(msg) => SimError::Sampling(msg),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("registry parse error: {0}")]
    Parse(String),

    #[error("invalid region selector {0:?}: expected \"ALL\" or comma-separated codes")]
    InvalidSelector(String),

    #[error("unknown region code {0:?}")]
    UnknownRegion(String),

    #[error("region configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RegionResult<T> = Result<T, RegionError>;

use cw_core::CwError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CwError),

    #[error("site {name:?} is invalid: {reason}")]
    InvalidSite { name: String, reason: String },

    #[error("duplicate site name {0:?}")]
    DuplicateSite(String),

    #[error("site {site:?} declares zone {zone:?} twice")]
    DuplicateZone { site: String, zone: String },

    #[error("site CSV parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

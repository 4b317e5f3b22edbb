use cw_core::CwError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("clock configuration error: {0}")]
    Config(String),

    #[error("failed to spawn clock worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CwError),
}

pub type ClockResult<T> = Result<T, ClockError>;

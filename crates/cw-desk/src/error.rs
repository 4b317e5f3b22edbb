use cw_core::CwError;
use cw_core::ids::{AlertId, BookingId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Core(#[from] CwError),

    #[error("alert {0} not found")]
    AlertNotFound(AlertId),

    #[error("booking {0} not found")]
    BookingNotFound(BookingId),

    #[error("broadcast message must not be empty")]
    EmptyMessage,

    #[error("cannot move {what} from {from} to {to}")]
    InvalidTransition {
        what: String,
        from: &'static str,
        to:   &'static str,
    },

    #[error("invalid time slot {0:?}: expected \"HH:MM-HH:MM\" with start before end")]
    InvalidSlot(String),

    #[error("hour {0} is not covered by the forecast")]
    HourNotForecast(u8),
}

pub type DeskResult<T> = Result<T, DeskError>;

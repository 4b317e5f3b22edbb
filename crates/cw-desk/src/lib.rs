//! `cw-desk`: operator-facing records kept beside the live metrics.
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`alerts`]    | `AlertLog`: SOS, incident reports, broadcasts       |
//! | [`bookings`]  | `BookingBook`: simulated darshan slot bookings      |
//! | [`calendar`]  | `FestivalCalendar`, `AartiSchedule`                 |
//! | [`forecast`]  | `CrowdForecast`, `ForecastObserver`                 |
//! | [`report`]    | `DeskReport`: summary plus alert counts             |
//!
//! Nothing here mutates the `MetricStore`.  `ForecastObserver` reads it from
//! the clock's refresh hook and `DeskReport` reads it under the caller's lock.

pub mod alerts;
pub mod bookings;
pub mod calendar;
pub mod error;
pub mod forecast;
pub mod report;


pub use alerts::{Alert, AlertLog, AlertStatus, Severity};
pub use bookings::{Booking, BookingBook, BookingStatus, TimeSlot};
pub use calendar::{AartiSchedule, Festival, FestivalCalendar};
pub use error::{DeskError, DeskResult};
pub use forecast::{CrowdForecast, ForecastObserver, ForecastSlot};
pub use report::DeskReport;

//! Production peak-hour predicates backed by the local wall clock.

use chrono::{Local, Timelike};

use cw_core::PeakSchedule;

/// A predicate that is `true` while the local hour falls inside `schedule`.
pub fn wall_clock_peak(schedule: PeakSchedule) -> impl Fn() -> bool + Send + 'static {
    move || schedule.is_peak(Local::now().hour() as u8)
}

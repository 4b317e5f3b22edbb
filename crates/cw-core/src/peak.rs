//! Rush-hour windows that double refresh volatility.
//!
//! A window is an inclusive range of local hours-of-day.  The default
//! schedule covers the morning (06–09) and evening (18–20) rush.

use crate::{CwError, CwResult};

/// One inclusive `[start_hour, end_hour]` range of local hours.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakWindow {
    pub start_hour: u8,
    pub end_hour:   u8,
}

impl PeakWindow {
    pub const fn new(start_hour: u8, end_hour: u8) -> Self {
        Self { start_hour, end_hour }
    }

    #[inline]
    pub fn contains(self, hour: u8) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour)
    }
}

/// The set of peak windows for a run.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PeakSchedule(pub Vec<PeakWindow>);

impl PeakSchedule {
    /// A schedule with no peak windows; volatility is never doubled.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// `true` if `hour` (0–23) falls inside any window.
    pub fn is_peak(&self, hour: u8) -> bool {
        self.0.iter().any(|w| w.contains(hour))
    }

    /// Reject windows that are inverted or reach past hour 23.
    pub fn validate(&self) -> CwResult<()> {
        for w in &self.0 {
            if w.end_hour > 23 || w.start_hour > w.end_hour {
                return Err(CwError::Config(format!(
                    "invalid peak window {:02}..={:02}: hours must satisfy start <= end <= 23",
                    w.start_hour, w.end_hour
                )));
            }
        }
        Ok(())
    }
}

impl Default for PeakSchedule {
    fn default() -> Self {
        Self(vec![PeakWindow::new(6, 9), PeakWindow::new(18, 20)])
    }
}

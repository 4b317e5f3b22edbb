//! Hourly crowd forecast for one tracked site.
//!
//! The forecast is a fixed table of hourly slots.  Predictions and
//! confidences are static; `actual` is overwritten as the day unfolds,
//! normally by [`ForecastObserver`] on every clock refresh.

use chrono::{Local, Timelike};
use tracing::debug;

use cw_clock::RefreshObserver;
use cw_core::{SiteId, Tick};
use cw_store::MetricStore;

use crate::{DeskError, DeskResult};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ForecastSlot {
    /// Local hour the slot starts at (0–23).
    pub hour:       u8,
    pub actual:     u32,
    pub predicted:  u32,
    /// Model confidence in percent.
    pub confidence: u8,
}

impl ForecastSlot {
    pub const fn new(hour: u8, actual: u32, predicted: u32, confidence: u8) -> Self {
        Self { hour, actual, predicted, confidence }
    }

    pub fn abs_error(&self) -> u32 {
        self.actual.abs_diff(self.predicted)
    }

    /// `"05:00"`
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// Reference day for the flagship site, 05:00 to 20:00.
pub const REFERENCE_DAY: [ForecastSlot; 16] = [
    ForecastSlot::new(5,  850,  900,  95),
    ForecastSlot::new(6,  2400, 2300, 92),
    ForecastSlot::new(7,  3800, 3900, 89),
    ForecastSlot::new(8,  4200, 4100, 91),
    ForecastSlot::new(9,  3600, 3700, 88),
    ForecastSlot::new(10, 2900, 3000, 90),
    ForecastSlot::new(11, 2200, 2300, 92),
    ForecastSlot::new(12, 3100, 3200, 87),
    ForecastSlot::new(13, 2800, 2700, 89),
    ForecastSlot::new(14, 2300, 2400, 91),
    ForecastSlot::new(15, 2600, 2500, 90),
    ForecastSlot::new(16, 2900, 3000, 88),
    ForecastSlot::new(17, 3400, 3300, 86),
    ForecastSlot::new(18, 3800, 3900, 84),
    ForecastSlot::new(19, 4000, 4100, 87),
    ForecastSlot::new(20, 3200, 3100, 89),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrowdForecast {
    slots: Vec<ForecastSlot>,
}

impl CrowdForecast {
    /// Slots must have distinct hours; they are kept sorted by hour.
    pub fn new(mut slots: Vec<ForecastSlot>) -> Self {
        slots.sort_by_key(|s| s.hour);
        slots.dedup_by_key(|s| s.hour);
        Self { slots }
    }

    pub fn reference_day() -> Self {
        Self::new(REFERENCE_DAY.to_vec())
    }

    pub fn slot(&self, hour: u8) -> Option<&ForecastSlot> {
        self.slots.iter().find(|s| s.hour == hour)
    }

    pub fn slots(&self) -> &[ForecastSlot] {
        &self.slots
    }

    /// Overwrite the observed value for `hour`.
    pub fn record_actual(&mut self, hour: u8, actual: u32) -> DeskResult<()> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.hour == hour)
            .ok_or(DeskError::HourNotForecast(hour))?;
        slot.actual = actual;
        Ok(())
    }

    /// Mean of `|actual - predicted|` over all slots; 0 when empty.
    pub fn mean_abs_error(&self) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        let total: u64 = self.slots.iter().map(|s| s.abs_error() as u64).sum();
        total as f64 / self.slots.len() as f64
    }

    /// Slot with the highest prediction (earliest on ties).
    pub fn predicted_peak(&self) -> Option<&ForecastSlot> {
        self.slots
            .iter()
            .rev()
            .max_by_key(|s| s.predicted)
    }
}

impl Default for CrowdForecast {
    fn default() -> Self {
        Self::reference_day()
    }
}

// ── ForecastObserver ──────────────────────────────────────────────────────────

/// Copies the tracked site's occupancy into the current hour's slot after
/// every refresh.  Hours outside the forecast are skipped.
pub struct ForecastObserver {
    forecast: CrowdForecast,
    site:     SiteId,
    hour:     Box<dyn Fn() -> u8 + Send>,
}

impl ForecastObserver {
    /// Track `site`, reading the hour from the local wall clock.
    pub fn new(forecast: CrowdForecast, site: SiteId) -> Self {
        Self {
            forecast,
            site,
            hour: Box::new(|| Local::now().hour() as u8),
        }
    }

    /// Replace the hour source.
    pub fn hour_source(mut self, hour: impl Fn() -> u8 + Send + 'static) -> Self {
        self.hour = Box::new(hour);
        self
    }

    pub fn forecast(&self) -> &CrowdForecast {
        &self.forecast
    }

    pub fn into_forecast(self) -> CrowdForecast {
        self.forecast
    }
}

impl RefreshObserver for ForecastObserver {
    fn on_refresh(&mut self, tick: Tick, store: &MetricStore) {
        let Ok(site) = store.get(self.site) else {
            debug!(site = %self.site, "forecast site missing from store");
            return;
        };
        let hour = (self.hour)();
        if self.forecast.record_actual(hour, site.occupancy()).is_err() {
            debug!(%tick, hour, "hour outside forecast; not recorded");
        }
    }
}

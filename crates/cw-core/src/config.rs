//! Top-level simulator configuration.
//!
//! Typically loaded from a TOML file by the application crate (with the
//! `serde` feature) and passed to the store builder and the clock.

use crate::{CwError, CwResult, PeakSchedule};

/// Default refresh cadence: one pass every 25 seconds.
pub const DEFAULT_INTERVAL_MS: u64 = 25_000;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulatorConfig {
    /// Milliseconds between refresh passes.  Must be non-zero.
    pub interval_ms: u64,

    /// Master RNG seed.  The same seed always produces identical metric
    /// trajectories.  `None` draws a seed from OS entropy at startup.
    pub seed: Option<u64>,

    /// Local-hour windows during which deltas are doubled.
    pub peak_windows: PeakSchedule,

    /// Write a per-site snapshot every N ticks.  1 = every tick.
    pub output_every_ticks: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            interval_ms:        DEFAULT_INTERVAL_MS,
            seed:               None,
            peak_windows:       PeakSchedule::default(),
            output_every_ticks: 1,
        }
    }
}

impl SimulatorConfig {
    /// Tick period as a `Duration`.
    #[inline]
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> CwResult<()> {
        if self.interval_ms == 0 {
            return Err(CwError::Config("interval_ms must be greater than zero".into()));
        }
        self.peak_windows.validate()
    }
}

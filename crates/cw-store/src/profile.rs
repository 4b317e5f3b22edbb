//! Volatility profiles for a refresh pass.
//!
//! The constants are tuning values, not contractual behaviour: any profile
//! keeps the clamping invariants because clamping happens in
//! [`Site::apply_delta`](crate::Site::apply_delta), not here.

/// Half-widths of the uniform deltas drawn for one refresh pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RefreshProfile {
    /// Occupancy delta is drawn from `[-occupancy_step, occupancy_step)`.
    pub occupancy_step: i32,
    /// Parking delta is drawn from `[-parking_step, parking_step)`.
    pub parking_step: i32,
    /// Each zone delta is drawn from `[-zone_step, zone_step)`.
    pub zone_step: i32,
    /// Wait in minutes when the site is exactly at capacity (before jitter).
    pub full_load_wait_minutes: u32,
    /// Wait jitter is drawn from `[0, wait_jitter)`.
    pub wait_jitter: u32,
}

impl RefreshProfile {
    /// Timer-driven cadence.
    pub const LIVE: RefreshProfile = RefreshProfile {
        occupancy_step:         50,
        parking_step:           15,
        zone_step:              10,
        full_load_wait_minutes: 80,
        wait_jitter:            20,
    };

    /// Operator-forced refresh: larger swings.
    pub const MANUAL: RefreshProfile = RefreshProfile {
        occupancy_step:         150,
        parking_step:           25,
        zone_step:              15,
        full_load_wait_minutes: 90,
        wait_jitter:            20,
    };

    /// Peak hours double the occupancy swing.
    #[inline]
    pub fn occupancy_multiplier(peak_hours_active: bool) -> i32 {
        if peak_hours_active { 2 } else { 1 }
    }
}

impl Default for RefreshProfile {
    fn default() -> Self {
        Self::LIVE
    }
}

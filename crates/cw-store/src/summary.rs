//! Aggregate figures across all sites, as shown on the dashboard header and
//! in generated reports.

use cw_core::StatusTier;

use crate::Site;

/// Store-wide totals and averages.  Averages are rounded to the nearest
/// whole number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StoreSummary {
    pub site_count:           usize,
    pub total_occupancy:      u64,
    pub total_capacity:       u64,
    /// Mean of per-site load percentages.
    pub average_load_pct:     u32,
    pub average_wait_minutes: u32,
    pub total_parking:        u64,
    pub crowded_sites:        usize,
}

impl StoreSummary {
    pub(crate) fn from_sites(sites: &[Site]) -> Self {
        if sites.is_empty() {
            return Self::default();
        }
        let n = sites.len() as f64;

        let load_sum: f64 = sites
            .iter()
            .map(|s| s.occupancy as f64 * 100.0 / s.capacity as f64)
            .sum();
        let wait_sum: u64 = sites.iter().map(|s| s.wait_minutes as u64).sum();

        Self {
            site_count:           sites.len(),
            total_occupancy:      sites.iter().map(|s| s.occupancy as u64).sum(),
            total_capacity:       sites.iter().map(|s| s.capacity as u64).sum(),
            average_load_pct:     (load_sum / n).round() as u32,
            average_wait_minutes: (wait_sum as f64 / n).round() as u32,
            total_parking:        sites.iter().map(|s| s.parking_available as u64).sum(),
            crowded_sites:        sites.iter().filter(|s| s.tier == StatusTier::Crowded).count(),
        }
    }
}

impl std::fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} visitors across {} sites ({}% avg load, {} min avg wait, {} parking free, {} crowded)",
            self.total_occupancy,
            self.site_count,
            self.average_load_pct,
            self.average_wait_minutes,
            self.total_parking,
            self.crowded_sites,
        )
    }
}

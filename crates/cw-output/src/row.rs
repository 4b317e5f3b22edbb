//! Plain data row types written by output backends.

use cw_core::{StatusTier, Tick};
use cw_store::{Site, StoreSummary};

/// One site's metrics at a given tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSnapshotRow {
    pub tick:              u64,
    pub unix_time_secs:    i64,
    pub site_id:           u32,
    pub name:              String,
    pub occupancy:         u32,
    pub capacity:          u32,
    pub load_pct:          u32,
    pub wait_minutes:      u32,
    pub parking_available: u32,
    pub tier:              StatusTier,
}

impl SiteSnapshotRow {
    pub fn from_site(tick: Tick, unix_time_secs: i64, site: &Site) -> Self {
        Self {
            tick: tick.0,
            unix_time_secs,
            site_id:           site.id().0,
            name:              site.name().to_owned(),
            occupancy:         site.occupancy(),
            capacity:          site.capacity(),
            load_pct:          site.load_pct(),
            wait_minutes:      site.wait_minutes(),
            parking_available: site.parking_available(),
            tier:              site.tier(),
        }
    }
}

/// Store-wide figures after one refresh pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummaryRow {
    pub tick:                 u64,
    pub unix_time_secs:       i64,
    pub total_occupancy:      u64,
    pub average_load_pct:     u32,
    pub average_wait_minutes: u32,
    pub total_parking:        u64,
    pub crowded_sites:        u32,
}

impl RefreshSummaryRow {
    pub fn from_summary(tick: Tick, unix_time_secs: i64, s: &StoreSummary) -> Self {
        Self {
            tick: tick.0,
            unix_time_secs,
            total_occupancy:      s.total_occupancy,
            average_load_pct:     s.average_load_pct,
            average_wait_minutes: s.average_wait_minutes,
            total_parking:        s.total_parking,
            crowded_sites:        s.crowded_sites as u32,
        }
    }
}

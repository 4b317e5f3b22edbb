//! The `Site` record and the single mutation step applied to it.

use cw_core::{GeoPoint, SiteId, SiteRng, StatusTier};

use crate::RefreshProfile;

/// Occupancy never drops below this many people (capped at capacity for very
/// small sites), so a site is never reported empty.
pub const OCCUPANCY_FLOOR: u32 = 100;

/// Lowest reported zone density, in percent.
pub const ZONE_DENSITY_MIN: u8 = 10;

/// Highest reported zone density, in percent.
pub const ZONE_DENSITY_MAX: u8 = 95;

// ── Zone ──────────────────────────────────────────────────────────────────────

/// A named area inside a site with its current density percentage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Zone {
    pub name:    String,
    pub density: u8,
}

// ── Site ──────────────────────────────────────────────────────────────────────

/// One monitored location.
///
/// Fields are read-only from outside the crate; the only mutator is
/// [`Site::apply_delta`], which re-establishes every range invariant and the
/// tier before returning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Site {
    pub(crate) id:                SiteId,
    pub(crate) name:              String,
    pub(crate) location:          String,
    pub(crate) position:          Option<GeoPoint>,
    pub(crate) capacity:          u32,
    pub(crate) occupancy:         u32,
    pub(crate) wait_minutes:      u32,
    pub(crate) parking_capacity:  u32,
    pub(crate) parking_available: u32,
    pub(crate) zones:             Vec<Zone>,
    pub(crate) tier:              StatusTier,
}

impl Site {
    #[inline] pub fn id(&self) -> SiteId { self.id }
    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn location(&self) -> &str { &self.location }
    #[inline] pub fn position(&self) -> Option<GeoPoint> { self.position }
    #[inline] pub fn capacity(&self) -> u32 { self.capacity }
    #[inline] pub fn occupancy(&self) -> u32 { self.occupancy }
    #[inline] pub fn wait_minutes(&self) -> u32 { self.wait_minutes }
    #[inline] pub fn parking_capacity(&self) -> u32 { self.parking_capacity }
    #[inline] pub fn parking_available(&self) -> u32 { self.parking_available }
    #[inline] pub fn zones(&self) -> &[Zone] { &self.zones }
    #[inline] pub fn tier(&self) -> StatusTier { self.tier }

    /// Density of the zone called `name`, if the site has one.
    pub fn zone_density(&self, name: &str) -> Option<u8> {
        self.zones.iter().find(|z| z.name == name).map(|z| z.density)
    }

    /// Occupancy as a whole percentage of capacity (rounded down).
    #[inline]
    pub fn load_pct(&self) -> u32 {
        (self.occupancy as u64 * 100 / self.capacity as u64) as u32
    }

    /// Lower clamp bound for occupancy.
    #[inline]
    pub fn occupancy_floor(&self) -> u32 {
        OCCUPANCY_FLOOR.min(self.capacity)
    }

    /// Apply one refresh step.
    ///
    /// Occupancy is clamped into `[occupancy_floor, capacity]`, parking into
    /// `[0, parking_capacity]` and each zone into
    /// `[ZONE_DENSITY_MIN, ZONE_DENSITY_MAX]`.  Wait time and tier are then
    /// derived from the new occupancy.  Zone deltas pair with zones by
    /// position; zones without a delta are left as they are.
    pub fn apply_delta(&mut self, delta: &SiteDelta) {
        self.occupancy = clamp_add(
            self.occupancy,
            delta.occupancy,
            self.occupancy_floor(),
            self.capacity,
        );

        self.wait_minutes = base_wait(self.occupancy, self.capacity, delta.full_load_wait_minutes)
            .saturating_add(delta.wait_jitter);

        self.parking_available = clamp_add(
            self.parking_available,
            delta.parking,
            0,
            self.parking_capacity,
        );

        for (zone, &dz) in self.zones.iter_mut().zip(&delta.zones) {
            zone.density = clamp_add(
                zone.density as u32,
                dz,
                ZONE_DENSITY_MIN as u32,
                ZONE_DENSITY_MAX as u32,
            ) as u8;
        }

        self.tier = StatusTier::classify(self.occupancy, self.capacity);
    }
}

// ── SiteDelta ─────────────────────────────────────────────────────────────────

/// The pre-clamp changes for one site in one refresh pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteDelta {
    pub occupancy:              i32,
    pub parking:                i32,
    /// One entry per zone, in the site's zone order.
    pub zones:                  Vec<i32>,
    /// Minutes added on top of the load-derived wait.
    pub wait_jitter:            u32,
    /// Wait in minutes at 100 % load, before jitter.
    pub full_load_wait_minutes: u32,
}

impl SiteDelta {
    /// Draw a delta for `site` from its RNG.
    ///
    /// The draw order (occupancy, wait jitter, parking, zones in order) is
    /// fixed so that a given seed always yields the same trajectory.
    pub fn sample(
        site:              &Site,
        rng:               &mut SiteRng,
        profile:           &RefreshProfile,
        peak_hours_active: bool,
    ) -> SiteDelta {
        let occupancy = rng
            .step(profile.occupancy_step)
            .saturating_mul(RefreshProfile::occupancy_multiplier(peak_hours_active));
        let wait_jitter = if profile.wait_jitter > 0 {
            rng.gen_range(0..profile.wait_jitter)
        } else {
            0
        };
        let parking = rng.step(profile.parking_step);
        let zones = site.zones.iter().map(|_| rng.step(profile.zone_step)).collect();

        SiteDelta {
            occupancy,
            parking,
            zones,
            wait_jitter,
            full_load_wait_minutes: profile.full_load_wait_minutes,
        }
    }
}

impl Default for SiteDelta {
    /// A delta that changes nothing but re-derives wait time and tier.
    fn default() -> Self {
        Self {
            occupancy:              0,
            parking:                0,
            zones:                  Vec::new(),
            wait_jitter:            0,
            full_load_wait_minutes: RefreshProfile::LIVE.full_load_wait_minutes,
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `value + delta` clamped into `[lo, hi]`, computed in `i64` so no delta can
/// wrap.
#[inline]
pub(crate) fn clamp_add(value: u32, delta: i32, lo: u32, hi: u32) -> u32 {
    (value as i64 + delta as i64).clamp(lo as i64, hi as i64) as u32
}

/// Load-derived wait: `occupancy / capacity * full_load_wait`, rounded down
/// and saturating at `u32::MAX`.
#[inline]
pub(crate) fn base_wait(occupancy: u32, capacity: u32, full_load_wait: u32) -> u32 {
    if capacity == 0 {
        return full_load_wait;
    }
    u32::try_from(occupancy as u64 * full_load_wait as u64 / capacity as u64).unwrap_or(u32::MAX)
}

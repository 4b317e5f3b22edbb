//! `MetricStore`: authoritative in-memory state of all sites.
//!
//! # Why are RNGs kept beside the sites rather than inside them?
//!
//! A refresh pass needs `&mut Site` and `&mut SiteRng` for the same index at
//! once, and read-only callers should never see RNG state.  Two parallel
//! `Vec`s zip cleanly in both the sequential and the Rayon path:
//!
//! ```ignore
//! sites.par_iter_mut()
//!     .zip(rngs.par_iter_mut())
//!     .for_each(|(site, rng)| { /* sample + apply */ });
//! ```

use cw_core::{CwError, CwResult, GeoPoint, SiteId, SiteRng, StatusTier};
use tracing::trace;

use crate::spatial::SiteIndex;
use crate::{RefreshProfile, Site, SiteDelta, StoreSummary};

#[cfg(feature = "fx-hash")]
pub(crate) type NameIndex = rustc_hash::FxHashMap<String, SiteId>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type NameIndex = std::collections::HashMap<String, SiteId>;

/// Owns every [`Site`] and is the sole mutation entry point.
///
/// The set of sites is fixed at build time (see
/// [`MetricStoreBuilder`](crate::MetricStoreBuilder)); `refresh` mutates them
/// in place.  `MetricStore` is not internally synchronised: share it across
/// threads behind a lock so a reader never sees a site whose occupancy has
/// moved but whose tier has not.
#[derive(Clone, Debug)]
pub struct MetricStore {
    sites:     Vec<Site>,
    rngs:      Vec<SiteRng>,
    by_name:   NameIndex,
    spatial:   SiteIndex,
    refreshes: u64,
}

impl MetricStore {
    pub(crate) fn from_parts(
        sites:   Vec<Site>,
        rngs:    Vec<SiteRng>,
        by_name: NameIndex,
        spatial: SiteIndex,
    ) -> Self {
        debug_assert_eq!(sites.len(), rngs.len());
        Self { sites, rngs, by_name, spatial, refreshes: 0 }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Perturb every site with the live profile.
    ///
    /// `peak_hours_active` doubles the occupancy swing.
    pub fn refresh(&mut self, peak_hours_active: bool) {
        self.refresh_with(&RefreshProfile::LIVE, peak_hours_active);
    }

    /// Perturb every site with an explicit profile.
    pub fn refresh_with(&mut self, profile: &RefreshProfile, peak_hours_active: bool) {
        #[cfg(not(feature = "parallel"))]
        {
            for (site, rng) in self.sites.iter_mut().zip(self.rngs.iter_mut()) {
                let delta = SiteDelta::sample(site, rng, profile, peak_hours_active);
                site.apply_delta(&delta);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.sites
                .par_iter_mut()
                .zip(self.rngs.par_iter_mut())
                .for_each(|(site, rng)| {
                    let delta = SiteDelta::sample(site, rng, profile, peak_hours_active);
                    site.apply_delta(&delta);
                });
        }

        self.refreshes += 1;
        trace!(refreshes = self.refreshes, peak_hours_active, "sites refreshed");
    }

    /// Apply an exact delta to one site, bypassing the RNG.
    pub fn apply(&mut self, id: SiteId, delta: &SiteDelta) -> CwResult<&Site> {
        let site = self
            .sites
            .get_mut(id.index())
            .ok_or(CwError::SiteNotFound(id))?;
        site.apply_delta(delta);
        Ok(&*site)
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Look up a site by id.
    pub fn get(&self, id: SiteId) -> CwResult<&Site> {
        self.sites.get(id.index()).ok_or(CwError::SiteNotFound(id))
    }

    /// Look up a site by its unique name.
    pub fn get_by_name(&self, name: &str) -> CwResult<&Site> {
        self.by_name
            .get(name)
            .map(|id| &self.sites[id.index()])
            .ok_or_else(|| CwError::SiteNameNotFound(name.to_owned()))
    }

    /// All sites in creation order.
    #[inline]
    pub fn all(&self) -> &[Site] {
        &self.sites
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Site> {
        self.sites.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Number of completed `refresh`/`refresh_with` passes.
    #[inline]
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    /// Sites currently classified as `tier`, in creation order.
    pub fn by_tier(&self, tier: StatusTier) -> impl Iterator<Item = &Site> + '_ {
        self.sites.iter().filter(move |s| s.tier == tier)
    }

    /// The positioned site closest to `pos`.  `None` if no site has a
    /// position.
    pub fn nearest(&self, pos: GeoPoint) -> Option<&Site> {
        self.spatial.nearest(pos).map(|id| &self.sites[id.index()])
    }

    /// Up to `k` positioned sites ordered by ascending distance from `pos`.
    pub fn k_nearest(&self, pos: GeoPoint, k: usize) -> Vec<&Site> {
        self.spatial
            .k_nearest(pos, k)
            .into_iter()
            .map(|id| &self.sites[id.index()])
            .collect()
    }

    /// Store-wide totals and averages.
    pub fn summary(&self) -> StoreSummary {
        StoreSummary::from_sites(&self.sites)
    }
}

impl<'a> IntoIterator for &'a MetricStore {
    type Item = &'a Site;
    type IntoIter = std::slice::Iter<'a, Site>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

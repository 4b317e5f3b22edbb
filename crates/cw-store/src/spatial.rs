//! R-tree over site positions for nearest-site lookups.
//!
//! Sites without a position are simply absent from the index.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cw_core::{GeoPoint, SiteId};

use crate::Site;

/// Entry stored in the R-tree: a 2-D `[lat, lon]` point with its `SiteId`.
#[derive(Clone, Debug)]
struct SiteEntry {
    point: [f32; 2], // [lat, lon]
    id:    SiteId,
}

impl RTreeObject for SiteEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SiteEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough to rank
    /// sites within one region; use `GeoPoint::distance_m` for display.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

#[derive(Clone)]
pub(crate) struct SiteIndex {
    tree: RTree<SiteEntry>,
}

impl std::fmt::Debug for SiteIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteIndex").field("len", &self.tree.size()).finish()
    }
}

impl SiteIndex {
    pub(crate) fn build(sites: &[Site]) -> Self {
        let entries = sites
            .iter()
            .filter_map(|s| {
                s.position.map(|p| SiteEntry { point: [p.lat, p.lon], id: s.id })
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub(crate) fn nearest(&self, pos: GeoPoint) -> Option<SiteId> {
        self.tree.nearest_neighbor(&[pos.lat, pos.lon]).map(|e| e.id)
    }

    pub(crate) fn k_nearest(&self, pos: GeoPoint, k: usize) -> Vec<SiteId> {
        self.tree
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

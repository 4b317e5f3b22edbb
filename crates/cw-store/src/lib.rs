//! `cw-store`: in-memory site metrics for the crowdwatch simulator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`site`]      | `Site`, `Zone`, `SiteDelta`, clamp bounds                  |
//! | [`profile`]   | `RefreshProfile` (`LIVE`, `MANUAL`)                        |
//! | [`store`]     | `MetricStore`: refresh, lookups, tier filter, nearest site |
//! | [`builder`]   | `SiteSpec`, `MetricStoreBuilder`                           |
//! | [`loader`]    | CSV site loading                                           |
//! | [`summary`]   | `StoreSummary`                                             |
//!
//! # Refresh pass
//!
//! ```text
//! for each site (creation order, or in parallel with `parallel`):
//!   ① sample SiteDelta from the site's own RNG
//!        occupancy ±step (×2 at peak), wait jitter, parking ±step, zones ±step
//!   ② apply: clamp occupancy to [min(100, capacity), capacity]
//!            wait = load × full_load_wait + jitter
//!            clamp parking to [0, parking_capacity]
//!            clamp zones to [10, 95]
//!            tier = classify(occupancy, capacity)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the per-site refresh work on Rayon's thread pool. |
//! | `fx-hash`  | FxHash for the site-name index.                        |
//! | `serde`    | `Serialize` on `Site`, `Zone`, `StoreSummary`.         |

pub mod builder;
pub mod error;
pub mod loader;
pub mod profile;
pub mod site;
pub mod store;
pub mod summary;

mod spatial;

#[cfg(test)]
mod tests;

pub use builder::{MetricStoreBuilder, SiteSpec};
pub use error::{StoreError, StoreResult};
pub use loader::{load_sites_csv, load_sites_reader};
pub use profile::RefreshProfile;
pub use site::{Site, SiteDelta, Zone, OCCUPANCY_FLOOR, ZONE_DENSITY_MAX, ZONE_DENSITY_MIN};
pub use store::MetricStore;
pub use summary::StoreSummary;

//! `cw-core`: foundational types for the `crowdwatch` live metrics simulator.
//!
//! This crate is a dependency of every other `cw-*` crate.  It has no `cw-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `SiteId`                                              |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SiteRng` (per-site), `SimRng` (global)               |
//! | [`tier`]        | `StatusTier` threshold classification                 |
//! | [`peak`]        | `PeakWindow`, `PeakSchedule`                          |
//! | [`config`]      | `SimulatorConfig`                                     |
//! | [`error`]       | `CwError`, `CwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod peak;
pub mod rng;
pub mod tier;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimulatorConfig;
pub use error::{CwError, CwResult};
pub use geo::GeoPoint;
pub use ids::SiteId;
pub use peak::{PeakSchedule, PeakWindow};
pub use rng::{SimRng, SiteRng};
pub use tier::StatusTier;
pub use time::Tick;

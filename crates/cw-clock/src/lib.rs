//! `cw-clock`: the pausable refresh scheduler.
//!
//! A [`SimulationClock`] owns a worker thread that calls
//! [`MetricStore::refresh`](cw_store::MetricStore::refresh) every interval
//! while holding the store's write lock, so readers holding the read lock
//! always see a fully refreshed snapshot.
//!
//! | Module       | Contents                                   |
//! |--------------|--------------------------------------------|
//! | [`clock`]    | `SimulationClock`, `SharedStore`, worker   |
//! | [`handle`]   | `ClockHandle`: pause, resume, stop         |
//! | [`state`]    | `ClockState`                               |
//! | [`observer`] | `RefreshObserver`, `NoopObserver`          |
//! | [`peak`]     | `wall_clock_peak`                          |

pub mod clock;
pub mod error;
pub mod handle;
pub mod observer;
pub mod peak;
pub mod state;


pub use clock::{shared, SharedStore, SimulationClock};
pub use error::{ClockError, ClockResult};
pub use handle::ClockHandle;
pub use observer::{NoopObserver, RefreshObserver};
pub use peak::wall_clock_peak;
pub use state::ClockState;

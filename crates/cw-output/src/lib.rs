//! `cw-output`: snapshot writers for the crowdwatch simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                      |
//! |-----------|---------|----------------------------------------------------|
//! | *(none)*  | CSV     | `site_snapshots.csv`, `refresh_summaries.csv`      |
//! | `sqlite`  | SQLite  | `crowdwatch.db`                                    |
//!
//! Both implement [`OutputWriter`] and are driven by [`SnapshotObserver`],
//! which implements `cw_clock::RefreshObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::{Arc, Mutex};
//! use cw_output::{CsvWriter, SnapshotObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let obs = Arc::new(Mutex::new(SnapshotObserver::new(writer, 1)));
//! let mut handle = SimulationClock::new(store).observer(obs.clone()).start(interval, peak)?;
//! // ...
//! handle.stop();
//! if let Some(e) = obs.lock().unwrap().take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SnapshotObserver;
pub use row::{RefreshSummaryRow, SiteSnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

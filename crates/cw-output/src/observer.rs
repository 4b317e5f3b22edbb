//! `SnapshotObserver<W>`: bridges `RefreshObserver` to an `OutputWriter`.

use chrono::Utc;
use tracing::warn;

use cw_clock::RefreshObserver;
use cw_core::{SimulatorConfig, Tick};
use cw_store::MetricStore;

use crate::row::{RefreshSummaryRow, SiteSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`RefreshObserver`] that writes a summary row on every refresh and
/// per-site snapshots every `every_ticks` refreshes.
///
/// Errors are stored because observer hooks have no return value.  Only the
/// first is kept; it is logged once when it happens.  After the clock stops,
/// check with [`take_error`](Self::take_error).
pub struct SnapshotObserver<W: OutputWriter> {
    writer:      W,
    every_ticks: u64,
    last_error:  Option<OutputError>,
}

impl<W: OutputWriter> SnapshotObserver<W> {
    /// `every_ticks == 0` disables per-site snapshots; summaries are still
    /// written.
    pub fn new(writer: W, every_ticks: u64) -> Self {
        Self { writer, every_ticks, last_error: None }
    }

    pub fn from_config(writer: W, config: &SimulatorConfig) -> Self {
        Self::new(writer, config.output_every_ticks)
    }

    /// Take the stored write error (if any).  `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "snapshot output failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> RefreshObserver for SnapshotObserver<W> {
    fn on_refresh(&mut self, tick: Tick, store: &MetricStore) {
        let now = Utc::now().timestamp();

        let summary = RefreshSummaryRow::from_summary(tick, now, &store.summary());
        let result = self.writer.write_summary(&summary);
        self.store_err(result);

        if tick.is_every(self.every_ticks) {
            let rows: Vec<SiteSnapshotRow> = store
                .iter()
                .map(|site| SiteSnapshotRow::from_site(tick, now, site))
                .collect();
            if !rows.is_empty() {
                let result = self.writer.write_snapshots(&rows);
                self.store_err(result);
            }
        }
    }

    fn on_stop(&mut self, _ticks: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

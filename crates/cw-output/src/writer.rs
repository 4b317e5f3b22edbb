//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, RefreshSummaryRow, SiteSnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Writers run on the clock's worker thread, hence `Send`.  Errors are
/// collected by [`SnapshotObserver`](crate::SnapshotObserver) and retrieved
/// with `take_error`.
pub trait OutputWriter: Send {
    /// Write a batch of site snapshots.
    fn write_snapshots(&mut self, rows: &[SiteSnapshotRow]) -> OutputResult<()>;

    /// Write one refresh summary row.
    fn write_summary(&mut self, row: &RefreshSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: OutputWriter + ?Sized> OutputWriter for Box<W> {
    fn write_snapshots(&mut self, rows: &[SiteSnapshotRow]) -> OutputResult<()> {
        (**self).write_snapshots(rows)
    }

    fn write_summary(&mut self, row: &RefreshSummaryRow) -> OutputResult<()> {
        (**self).write_summary(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}

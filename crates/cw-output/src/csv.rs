//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `site_snapshots.csv`
//! - `refresh_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RefreshSummaryRow, SiteSnapshotRow};

pub const SNAPSHOT_HEADERS: [&str; 10] = [
    "tick",
    "unix_time_secs",
    "site_id",
    "name",
    "occupancy",
    "capacity",
    "load_pct",
    "wait_minutes",
    "parking_available",
    "tier",
];

pub const SUMMARY_HEADERS: [&str; 7] = [
    "tick",
    "unix_time_secs",
    "total_occupancy",
    "average_load_pct",
    "average_wait_minutes",
    "total_parking",
    "crowded_sites",
];

/// Writes snapshot output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("site_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("refresh_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[SiteSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.unix_time_secs.to_string(),
                row.site_id.to_string(),
                row.name.clone(),
                row.occupancy.to_string(),
                row.capacity.to_string(),
                row.load_pct.to_string(),
                row.wait_minutes.to_string(),
                row.parking_available.to_string(),
                row.tier.as_str().to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &RefreshSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.total_occupancy.to_string(),
            row.average_load_pct.to_string(),
            row.average_wait_minutes.to_string(),
            row.total_parking.to_string(),
            row.crowded_sites.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}

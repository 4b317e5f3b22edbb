//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `crowdwatch.db` file in the configured output directory
//! with two tables: `site_snapshots` and `refresh_summaries`.  Like the CSV
//! backend, each writer starts a fresh run: tables left by an earlier run are
//! dropped, since tick numbers restart at 0 with every clock.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, RefreshSummaryRow, SiteSnapshotRow};

/// Writes snapshot output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `crowdwatch.db` in `dir` and recreate the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("crowdwatch.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS site_snapshots;
             DROP TABLE IF EXISTS refresh_summaries;
             CREATE TABLE site_snapshots (
                 tick              INTEGER NOT NULL,
                 unix_time_secs    INTEGER NOT NULL,
                 site_id           INTEGER NOT NULL,
                 name              TEXT    NOT NULL,
                 occupancy         INTEGER NOT NULL,
                 capacity          INTEGER NOT NULL,
                 load_pct          INTEGER NOT NULL,
                 wait_minutes      INTEGER NOT NULL,
                 parking_available INTEGER NOT NULL,
                 tier              TEXT    NOT NULL
             );
             CREATE TABLE refresh_summaries (
                 tick                 INTEGER PRIMARY KEY,
                 unix_time_secs       INTEGER NOT NULL,
                 total_occupancy      INTEGER NOT NULL,
                 average_load_pct     INTEGER NOT NULL,
                 average_wait_minutes INTEGER NOT NULL,
                 total_parking        INTEGER NOT NULL,
                 crowded_sites        INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[SiteSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO site_snapshots \
                 (tick, unix_time_secs, site_id, name, occupancy, capacity, \
                  load_pct, wait_minutes, parking_available, tier) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.unix_time_secs,
                    row.site_id,
                    row.name,
                    row.occupancy,
                    row.capacity,
                    row.load_pct,
                    row.wait_minutes,
                    row.parking_available,
                    row.tier.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &RefreshSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO refresh_summaries \
             (tick, unix_time_secs, total_occupancy, average_load_pct, \
              average_wait_minutes, total_parking, crowded_sites) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.tick as i64,
                row.unix_time_secs,
                row.total_occupancy as i64,
                row.average_load_pct,
                row.average_wait_minutes,
                row.total_parking as i64,
                row.crowded_sites,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

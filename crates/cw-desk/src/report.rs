//! Point-in-time desk report: the store summary plus alert counts.

use chrono::{DateTime, Local};
use tracing::info;

use cw_store::{MetricStore, StoreSummary};

use crate::AlertLog;

#[derive(Clone, Debug, PartialEq)]
pub struct DeskReport {
    pub generated_at:  DateTime<Local>,
    pub refresh_count: u64,
    pub summary:       StoreSummary,
    /// Every alert in the log, resolved ones included.
    pub alert_count:   usize,
    pub open_alerts:   usize,
}

impl DeskReport {
    pub fn generate(store: &MetricStore, alerts: &AlertLog) -> Self {
        Self::generate_at(Local::now(), store, alerts)
    }

    pub fn generate_at(at: DateTime<Local>, store: &MetricStore, alerts: &AlertLog) -> Self {
        let report = Self {
            generated_at:  at,
            refresh_count: store.refresh_count(),
            summary:       store.summary(),
            alert_count:   alerts.len(),
            open_alerts:   alerts.active().count(),
        };
        info!(
            visitors = report.summary.total_occupancy,
            sites = report.summary.site_count,
            alerts = report.alert_count,
            "desk report generated"
        );
        report
    }
}

impl std::fmt::Display for DeskReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "report {} after {} refreshes: {}; {} alerts ({} open)",
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
            self.refresh_count,
            self.summary,
            self.alert_count,
            self.open_alerts,
        )
    }
}

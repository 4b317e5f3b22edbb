//! Emergency and broadcast alert log.
//!
//! ```text
//! raise_sos       → Active        (High)
//! report_incident → Investigating (Medium)
//! broadcast       → Sent          (Low)
//!
//! Active | Investigating ──acknowledge──▶ Monitoring
//! Active | Investigating | Monitoring ──resolve──▶ Resolved
//! ```
//!
//! Broadcasts are informational and never change status.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};
use tracing::info;

use cw_core::ids::AlertId;

use crate::{DeskError, DeskResult};

/// Responders dispatched for every SOS.
pub const SOS_RESPONDERS: [&str; 4] =
    ["Emergency Services", "Temple Security", "Medical Team", "Police"];

/// Target used when a broadcast names none.
pub const ALL_SITES: &str = "All Temples";

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low    => "low",
            Severity::Medium => "medium",
            Severity::High   => "high",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AlertStatus {
    Active,
    Monitoring,
    Investigating,
    Sent,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertStatus::Active        => "active",
            AlertStatus::Monitoring    => "monitoring",
            AlertStatus::Investigating => "investigating",
            AlertStatus::Sent          => "sent",
            AlertStatus::Resolved      => "resolved",
        }
    }

    /// Still needs attention from staff.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            AlertStatus::Active | AlertStatus::Monitoring | AlertStatus::Investigating
        )
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One logged alert.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub id:         AlertId,
    /// Site name, broadcast target, or a free-form origin.
    pub site:       String,
    /// Snake-case category such as `emergency_sos` or `crowd_surge`.
    pub kind:       String,
    pub severity:   Severity,
    pub location:   String,
    pub message:    String,
    pub raised_at:  DateTime<Local>,
    pub status:     AlertStatus,
    pub responders: Vec<String>,
}

/// Alerts in newest-first order.
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts:  VecDeque<Alert>,
    next_id: u32,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an SOS from a pilgrim at `location`.  High severity, all
    /// responders dispatched.
    pub fn raise_sos(&mut self, location: impl Into<String>) -> &Alert {
        let location = location.into();
        info!(%location, "SOS raised");
        self.push(Alert {
            id:         AlertId::INVALID,
            site:       "User Location".to_owned(),
            kind:       "emergency_sos".to_owned(),
            severity:   Severity::High,
            location,
            message:    "EMERGENCY SOS ACTIVATED - Immediate assistance dispatched".to_owned(),
            raised_at:  Local::now(),
            status:     AlertStatus::Active,
            responders: SOS_RESPONDERS.iter().map(|r| (*r).to_owned()).collect(),
        })
    }

    /// Log a pilgrim-reported incident such as "Medical Emergency" or
    /// "Lost Person".
    pub fn report_incident(&mut self, incident: &str) -> &Alert {
        let incident = incident.trim();
        info!(incident, "incident reported");
        self.push(Alert {
            id:         AlertId::INVALID,
            site:       "User Location".to_owned(),
            kind:       slug(incident),
            severity:   Severity::Medium,
            location:   "Pilgrim Reported".to_owned(),
            message:    format!(
                "{incident} reported - Relevant authorities have been notified and dispatched"
            ),
            raised_at:  Local::now(),
            status:     AlertStatus::Investigating,
            responders: Vec::new(),
        })
    }

    /// Log an admin broadcast.  A blank `target` means every site; a blank
    /// `message` is rejected and nothing is logged.
    pub fn broadcast(&mut self, target: &str, message: &str) -> DeskResult<&Alert> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DeskError::EmptyMessage);
        }
        let target = match target.trim() {
            "" => ALL_SITES,
            t => t,
        };
        info!(target, "broadcast sent");
        Ok(self.push(Alert {
            id:         AlertId::INVALID,
            site:       target.to_owned(),
            kind:       "broadcast_alert".to_owned(),
            severity:   Severity::Low,
            location:   "System Wide".to_owned(),
            message:    format!("Admin Broadcast: {message}"),
            raised_at:  Local::now(),
            status:     AlertStatus::Sent,
            responders: Vec::new(),
        }))
    }

    /// Log a fully specified alert, e.g. one raised by an automated
    /// density check.
    pub fn record(&mut self, alert: Alert) -> &Alert {
        self.push(alert)
    }

    /// Staff have seen the alert and are watching it.
    pub fn acknowledge(&mut self, id: AlertId) -> DeskResult<&Alert> {
        self.transition(id, AlertStatus::Monitoring, |s| {
            matches!(s, AlertStatus::Active | AlertStatus::Investigating)
        })
    }

    pub fn resolve(&mut self, id: AlertId) -> DeskResult<&Alert> {
        self.transition(id, AlertStatus::Resolved, AlertStatus::is_open)
    }

    pub fn get(&self, id: AlertId) -> DeskResult<&Alert> {
        self.alerts
            .iter()
            .find(|a| a.id == id)
            .ok_or(DeskError::AlertNotFound(id))
    }

    /// Open alerts, newest first.
    pub fn active(&self) -> impl Iterator<Item = &Alert> + '_ {
        self.alerts.iter().filter(|a| a.status.is_open())
    }

    /// All alerts, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> + '_ {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    fn push(&mut self, mut alert: Alert) -> &Alert {
        alert.id = AlertId(self.next_id);
        self.next_id += 1;
        self.alerts.push_front(alert);
        &self.alerts[0]
    }

    fn transition(
        &mut self,
        id: AlertId,
        to: AlertStatus,
        allowed: impl Fn(AlertStatus) -> bool,
    ) -> DeskResult<&Alert> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(DeskError::AlertNotFound(id))?;
        if !allowed(alert.status) {
            return Err(DeskError::InvalidTransition {
                what: id.to_string(),
                from: alert.status.as_str(),
                to:   to.as_str(),
            });
        }
        info!(%id, from = alert.status.as_str(), to = to.as_str(), "alert status changed");
        alert.status = to;
        Ok(&*alert)
    }
}

/// "Medical Emergency" → "medical_emergency".
fn slug(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

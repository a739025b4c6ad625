//! Complaint records as the engine sees them.
//!
//! The record is owned by the surrounding application; the engine
//! writes severity, priority_score, sla_deadline and status. Status
//! transitions performed by the engine are limited to
//! OPEN/IN_PROGRESS → ESCALATED — RESOLVED is terminal and never
//! touched by the sweep.

use crate::{
    severity::{PredictedSeverity, Severity},
    types::{ComplaintId, UserId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Open,
    InProgress,
    Resolved,
    Escalated,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Escalated => "ESCALATED",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "OPEN" => Some(Self::Open),
            "IN_PROGRESS" => Some(Self::InProgress),
            "RESOLVED" => Some(Self::Resolved),
            "ESCALATED" => Some(Self::Escalated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub complaint_id: ComplaintId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub severity: Severity,
    pub status: Status,
    pub priority_score: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sla_deadline: DateTime<Utc>,
}

/// Input to complaint creation. `user_severity` is optional — when
/// absent, the category rule table supplies the base severity.
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub user_id: UserId,
    pub user_severity: Option<Severity>,
}

/// Result of filing a complaint. `needs_alert` tells the caller the
/// ticket crossed the staff-alert threshold; delivery is out of scope.
#[derive(Debug, Clone)]
pub struct FiledComplaint {
    pub record: ComplaintRecord,
    pub ml_severity: PredictedSeverity,
    pub needs_alert: bool,
}

//! Audit events.
//!
//! Every engine-driven write to a complaint is accompanied by an
//! event appended to the audit log. Events are produced and consumed
//! by explicit function calls — there is no listener bus; the caller
//! that performs an operation persists its events in the same pass.

use crate::{error::TriageResult, types::ComplaintId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every audit event the engine emits. The serialized `type` tag uses
/// the variant name verbatim ("SLABreached", "PriorityCalculated", …)
/// — these literals are consumed downstream, never rename them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TriageEvent {
    ComplaintRaised {
        complaint_id: ComplaintId,
        title: String,
        severity: String,
        message: String,
    },
    PriorityCalculated {
        complaint_id: ComplaintId,
        new_score: i64,
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<PriorityDetails>,
    },
    StatusUpdated {
        complaint_id: ComplaintId,
        status: String,
        message: String,
    },
    SLABreached {
        complaint_id: ComplaintId,
        overdue_seconds: i64,
    },
}

/// How a creation-time score was assembled, for the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityDetails {
    pub rule_severity: String,
    pub ml_prediction: String,
    pub sla_hours: u32,
    pub algorithm: String,
}

/// The audit log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub complaint_id: ComplaintId,
    pub event_type: String,
    pub payload: String, // JSON-serialized TriageEvent
    pub created_at: DateTime<Utc>,
}

impl EventLogEntry {
    pub fn new(
        complaint_id: ComplaintId,
        event: &TriageEvent,
        at: DateTime<Utc>,
    ) -> TriageResult<Self> {
        Ok(Self {
            id: None,
            complaint_id,
            event_type: event_type_name(event).to_string(),
            payload: serde_json::to_string(event)?,
            created_at: at,
        })
    }
}

/// Stable string name for an event variant — the event_type column.
pub fn event_type_name(event: &TriageEvent) -> &'static str {
    match event {
        TriageEvent::ComplaintRaised { .. } => "ComplaintRaised",
        TriageEvent::PriorityCalculated { .. } => "PriorityCalculated",
        TriageEvent::StatusUpdated { .. } => "StatusUpdated",
        TriageEvent::SLABreached { .. } => "SLABreached",
    }
}

//! SLA escalation sweep.
//!
//! Externally triggered (cron or poll — the sweep never schedules
//! itself). One pass selects every actionable complaint past its
//! deadline, force-escalates it and boosts its priority, and appends
//! two audit events per breach. Already-ESCALATED and RESOLVED rows
//! are never selected, so repeated sweeps are idempotent and
//! concurrent sweeps cannot double-boost a score.
//!
//! A failure on one complaint is logged and skipped; it never aborts
//! the rest of the pass.

use crate::{
    complaint::ComplaintRecord,
    config::ScoringConfig,
    error::TriageResult,
    event::{EventLogEntry, TriageEvent},
    store::TriageStore,
    types::ComplaintId,
};
use chrono::{DateTime, Utc};

pub const ESCALATION_REASON: &str = "SLA Breach Auto-Escalation";

#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Overdue complaints selected this pass.
    pub checked: usize,
    /// Breaches actually escalated (excludes races lost to a
    /// concurrent sweep).
    pub breaches: usize,
    pub escalated: Vec<ComplaintId>,
}

/// Run one sweep pass at `now`.
pub fn run_sweep(
    store: &TriageStore,
    now: DateTime<Utc>,
    config: &ScoringConfig,
) -> TriageResult<SweepReport> {
    let overdue = store.overdue_complaints(now)?;
    let mut report = SweepReport {
        checked: overdue.len(),
        ..Default::default()
    };

    for complaint in &overdue {
        match escalate_one(store, complaint, now, config) {
            Ok(Some(new_score)) => {
                log::debug!(
                    "sweep: escalated {} (score {} -> {new_score})",
                    complaint.complaint_id,
                    complaint.priority_score,
                );
                report.breaches += 1;
                report.escalated.push(complaint.complaint_id.clone());
            }
            Ok(None) => {
                // Lost the race to a concurrent sweep or a manual
                // status change between select and update. Not a breach.
            }
            Err(e) => {
                log::warn!(
                    "sweep: escalation failed for {}: {e}",
                    complaint.complaint_id
                );
            }
        }
    }

    if report.breaches > 0 {
        log::info!(
            "sweep: {} of {} overdue complaints escalated",
            report.breaches,
            report.checked
        );
    }
    Ok(report)
}

fn escalate_one(
    store: &TriageStore,
    complaint: &ComplaintRecord,
    now: DateTime<Utc>,
    config: &ScoringConfig,
) -> TriageResult<Option<i64>> {
    let Some(new_score) =
        store.escalate_complaint(&complaint.complaint_id, config.escalation_boost, now)?
    else {
        return Ok(None);
    };

    let overdue_seconds = (now - complaint.sla_deadline).num_seconds();
    store.append_event(&EventLogEntry::new(
        complaint.complaint_id.clone(),
        &TriageEvent::SLABreached {
            complaint_id: complaint.complaint_id.clone(),
            overdue_seconds,
        },
        now,
    )?)?;
    store.append_event(&EventLogEntry::new(
        complaint.complaint_id.clone(),
        &TriageEvent::PriorityCalculated {
            complaint_id: complaint.complaint_id.clone(),
            new_score,
            reason: ESCALATION_REASON.to_string(),
            details: None,
        },
        now,
    )?)?;

    Ok(Some(new_score))
}

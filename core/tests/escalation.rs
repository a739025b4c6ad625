//! SLA escalation sweep tests.

use chrono::{Duration, Utc};
use hosteldesk_core::{
    complaint::{FiledComplaint, NewComplaint, Status},
    config::TriageConfig,
    engine::TriageEngine,
    store::TriageStore,
};

fn engine() -> TriageEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = TriageStore::in_memory().unwrap();
    TriageEngine::build(TriageConfig::default(), 42, store).unwrap()
}

/// File a Carpentry ticket (24h SLA) `hours_ago` hours in the past.
fn file_backdated(engine: &TriageEngine, hours_ago: i64) -> FiledComplaint {
    engine
        .file_complaint(
            NewComplaint {
                title: "Cupboard door jammed".to_string(),
                description: "cupboard is jammed and making noise".to_string(),
                category: "Carpentry".to_string(),
                location: "Room 214".to_string(),
                user_id: "student-1".to_string(),
                user_severity: None,
            },
            Utc::now() - Duration::hours(hours_ago),
        )
        .unwrap()
}

/// First sweep on a breached complaint: +50 and ESCALATED. Second
/// sweep: both fields untouched — escalation is idempotent.
#[test]
fn breach_escalates_exactly_once() {
    let engine = engine();
    let filed = file_backdated(&engine, 30); // 24h SLA, 6h overdue
    let before = filed.record.priority_score;
    let now = Utc::now();

    let first = engine.run_sla_sweep(now).unwrap();
    assert_eq!(first.breaches, 1);
    assert_eq!(first.escalated, vec![filed.record.complaint_id.clone()]);

    let after = engine.get_complaint(&filed.record.complaint_id).unwrap();
    assert_eq!(after.status, Status::Escalated);
    assert_eq!(after.priority_score, before + 50);

    let second = engine.run_sla_sweep(now).unwrap();
    assert_eq!(second.checked, 0);
    assert_eq!(second.breaches, 0);

    let unchanged = engine.get_complaint(&filed.record.complaint_id).unwrap();
    assert_eq!(unchanged.status, Status::Escalated);
    assert_eq!(unchanged.priority_score, before + 50);
}

/// RESOLVED is terminal — an overdue but resolved complaint is never
/// escalated and its score never moves.
#[test]
fn resolved_is_never_escalated() {
    let engine = engine();
    let filed = file_backdated(&engine, 30);
    engine
        .update_status(&filed.record.complaint_id, Status::Resolved, Utc::now())
        .unwrap();

    let report = engine.run_sla_sweep(Utc::now()).unwrap();
    assert_eq!(report.breaches, 0);

    let after = engine.get_complaint(&filed.record.complaint_id).unwrap();
    assert_eq!(after.status, Status::Resolved);
    assert_eq!(after.priority_score, filed.record.priority_score);
}

/// IN_PROGRESS complaints still escalate on breach.
#[test]
fn in_progress_escalates_on_breach() {
    let engine = engine();
    let filed = file_backdated(&engine, 30);
    engine
        .update_status(&filed.record.complaint_id, Status::InProgress, Utc::now())
        .unwrap();

    let report = engine.run_sla_sweep(Utc::now()).unwrap();
    assert_eq!(report.breaches, 1);
    let after = engine.get_complaint(&filed.record.complaint_id).unwrap();
    assert_eq!(after.status, Status::Escalated);
}

/// A complaint still inside its SLA window is left alone.
#[test]
fn within_sla_is_untouched() {
    let engine = engine();
    let filed = file_backdated(&engine, 2); // 24h SLA, 22h remaining

    let report = engine.run_sla_sweep(Utc::now()).unwrap();
    assert_eq!(report.checked, 0);

    let after = engine.get_complaint(&filed.record.complaint_id).unwrap();
    assert_eq!(after.status, Status::Open);
    assert_eq!(after.priority_score, filed.record.priority_score);
}

/// Each breach appends the audit pair: SLABreached with the overdue
/// duration, then PriorityCalculated with the boosted score and the
/// escalation reason.
#[test]
fn breach_writes_audit_pair() {
    let engine = engine();
    let filed = file_backdated(&engine, 30);
    let before = filed.record.priority_score;
    engine.run_sla_sweep(Utc::now()).unwrap();

    let events = engine
        .events_for_complaint(&filed.record.complaint_id)
        .unwrap();
    let types: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
    // Creation writes ComplaintRaised + PriorityCalculated; the sweep
    // appends its own pair in order.
    assert_eq!(
        types,
        vec![
            "ComplaintRaised",
            "PriorityCalculated",
            "SLABreached",
            "PriorityCalculated",
        ]
    );

    let breach: serde_json::Value = serde_json::from_str(&events[2].payload).unwrap();
    assert_eq!(breach["type"], "SLABreached");
    assert!(breach["overdue_seconds"].as_i64().unwrap() > 0);

    let boost: serde_json::Value = serde_json::from_str(&events[3].payload).unwrap();
    assert_eq!(boost["reason"], "SLA Breach Auto-Escalation");
    assert_eq!(boost["new_score"].as_i64().unwrap(), before + 50);
}

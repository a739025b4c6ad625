//! Engine end-to-end tests: complaint creation, queue ordering,
//! audit trail, user filtering.

use chrono::{Duration, Utc};
use hosteldesk_core::{
    complaint::{NewComplaint, Status},
    config::TriageConfig,
    engine::TriageEngine,
    severity::Severity,
    store::TriageStore,
};

fn engine() -> TriageEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = TriageStore::in_memory().unwrap();
    TriageEngine::build(TriageConfig::default(), 42, store).unwrap()
}

fn complaint(title: &str, description: &str, category: &str, user: &str) -> NewComplaint {
    NewComplaint {
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        location: "Block A".to_string(),
        user_id: user.to_string(),
        user_severity: None,
    }
}

/// Creation pulls severity and the SLA deadline from the rule table.
#[test]
fn creation_applies_rule_table() {
    let engine = engine();
    let now = Utc::now();
    let filed = engine
        .file_complaint(
            complaint(
                "Ventilator alarm",
                "monitor sparking and burning smell",
                "KMCH Medical Equipment",
                "student-1",
            ),
            now,
        )
        .unwrap();

    assert_eq!(filed.record.severity, Severity::Critical);
    assert_eq!(filed.record.status, Status::Open);
    assert_eq!(filed.record.sla_deadline, now + Duration::hours(1));
    assert!(filed.needs_alert, "Critical tickets always alert staff");
}

/// Unknown categories still produce a scorable complaint via the
/// {Low, 48h} fallback.
#[test]
fn unknown_category_is_scorable() {
    let engine = engine();
    let now = Utc::now();
    let filed = engine
        .file_complaint(
            complaint(
                "Vending machine broken",
                "snack machine not dispensing",
                "Vending Machines",
                "student-1",
            ),
            now,
        )
        .unwrap();

    assert_eq!(filed.record.severity, Severity::Low);
    assert_eq!(filed.record.sla_deadline, now + Duration::hours(48));
    assert!((0..=100).contains(&filed.record.priority_score));
}

/// An explicit user severity overrides the rule table's base.
#[test]
fn user_severity_overrides_rule_table() {
    let engine = engine();
    let mut new = complaint(
        "Printer down before exams",
        "printer not working at all",
        "Printer Service",
        "student-2",
    );
    new.user_severity = Some(Severity::Critical);
    let filed = engine.file_complaint(new, Utc::now()).unwrap();
    assert_eq!(filed.record.severity, Severity::Critical);
}

/// The work queue sorts by priority score descending; the emergency
/// lands on top of the cosmetic report.
#[test]
fn queue_orders_by_priority() {
    let engine = engine();
    let now = Utc::now();
    engine
        .file_complaint(
            complaint(
                "Curtain looks dirty",
                "curtain is dirty and dusty",
                "Website Updates",
                "student-1",
            ),
            now,
        )
        .unwrap();
    let emergency = engine
        .file_complaint(
            complaint(
                "Exposed wire sparking",
                "sparking exposed wire is dangerous near the entrance",
                "Electrical Maintenance",
                "student-2",
            ),
            now,
        )
        .unwrap();

    let queue = engine.queue().unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].complaint_id, emergency.record.complaint_id);
    assert!(queue
        .windows(2)
        .all(|w| w[0].priority_score >= w[1].priority_score));
}

/// Filing writes the ComplaintRaised + PriorityCalculated audit pair,
/// and the score audit carries the scoring breakdown.
#[test]
fn filing_writes_audit_events() {
    let engine = engine();
    let filed = engine
        .file_complaint(
            complaint(
                "Wifi down",
                "wifi is disconnected in block A",
                "Hostel Wifi",
                "student-1",
            ),
            Utc::now(),
        )
        .unwrap();

    let events = engine
        .events_for_complaint(&filed.record.complaint_id)
        .unwrap();
    let types: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(types, vec!["ComplaintRaised", "PriorityCalculated"]);

    let audit: serde_json::Value = serde_json::from_str(&events[1].payload).unwrap();
    assert_eq!(audit["new_score"].as_i64(), Some(filed.record.priority_score));
    assert_eq!(audit["details"]["sla_hours"].as_u64(), Some(4));
    assert_eq!(
        audit["details"]["ml_prediction"].as_str(),
        Some(filed.ml_severity.as_label())
    );
}

/// Status updates are app-driven, persisted, and audited.
#[test]
fn status_update_is_audited() {
    let engine = engine();
    let filed = engine
        .file_complaint(
            complaint(
                "Tap dripping",
                "water tap is dripping",
                "Plumbing",
                "student-1",
            ),
            Utc::now(),
        )
        .unwrap();

    let updated = engine
        .update_status(&filed.record.complaint_id, Status::InProgress, Utc::now())
        .unwrap();
    assert_eq!(updated.status, Status::InProgress);

    let events = engine
        .events_for_complaint(&filed.record.complaint_id)
        .unwrap();
    assert_eq!(events.last().unwrap().event_type, "StatusUpdated");
}

/// complaints_for_user only returns the reporting user's tickets.
#[test]
fn user_filter_returns_own_tickets() {
    let engine = engine();
    let now = Utc::now();
    engine
        .file_complaint(
            complaint("Fan noisy", "fan is making noise", "Electrical Maintenance", "alice"),
            now,
        )
        .unwrap();
    engine
        .file_complaint(
            complaint("Mirror stained", "mirror is stained", "Facility Management", "bob"),
            now,
        )
        .unwrap();

    let mine = engine.complaints_for_user("alice").unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_id, "alice");
}

/// The trend report runs over filed complaints and names a weekday.
#[test]
fn trend_report_names_a_weekday() {
    let engine = engine();
    engine
        .file_complaint(
            complaint("Sink clogged", "sink is clogged", "Plumbing", "student-1"),
            Utc::now(),
        )
        .unwrap();

    let insight = engine.trend_report().unwrap();
    const DAYS: [&str; 7] = [
        "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
    ];
    assert!(DAYS.contains(&insight.riskiest_day.as_str()));
    assert!(insight
        .observation
        .contains(insight.riskiest_day.as_str()));
}

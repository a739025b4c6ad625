//! triage-runner: headless driver for the hostel triage engine.
//!
//! Files a batch of demo complaints (some backdated past their SLA),
//! runs one escalation sweep, and prints the resulting work queue,
//! the audit trail of the top ticket, and the trend report.
//!
//! Usage:
//!   triage-runner --seed 42 --db triage.db
//!   triage-runner --config triage_config.json

use anyhow::Result;
use chrono::{Duration, Utc};
use hosteldesk_core::{
    complaint::NewComplaint,
    config::TriageConfig,
    engine::TriageEngine,
    store::TriageStore,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => TriageConfig::load(&w[1])?,
        None => TriageConfig::default(),
    };

    println!("Hostel Desk — triage-runner");
    println!("  seed: {seed}");
    println!("  db:   {db}");
    println!();

    let store = if db == ":memory:" {
        TriageStore::in_memory()?
    } else {
        TriageStore::open(db)?
    };
    let engine = TriageEngine::build(config, seed, store)?;
    log::info!("engine ready (seed {seed})");

    let now = Utc::now();

    // A spread of demo tickets: one genuine emergency, one overdue
    // medium ticket (filed 30 hours ago against a 24h SLA), one
    // cosmetic report, one unknown category.
    let demos = [
        (
            "Sparking from the switchboard",
            "short circuit sparks coming out near the entrance, burning smell",
            "Electrical Maintenance",
            "Block A, 2nd floor",
            now,
        ),
        (
            "Cupboard door is jammed",
            "cupboard is jammed and making noise",
            "Carpentry",
            "Room 214",
            now - Duration::hours(30),
        ),
        (
            "Paint peeling near window",
            "paint is peeling off and the wall is dusty",
            "Facility Management",
            "Common area",
            now,
        ),
        (
            "Vending machine out of order",
            "snack machine not dispensing",
            "Vending Machines",
            "Pantry",
            now,
        ),
    ];

    for (title, description, category, location, filed_at) in demos {
        let filed = engine.file_complaint(
            NewComplaint {
                title: title.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                location: location.to_string(),
                user_id: "demo-student".to_string(),
                user_severity: None,
            },
            filed_at,
        )?;
        println!(
            "filed: [{:>3}] {:<10} ml={:<6} alert={} {}",
            filed.record.priority_score,
            filed.record.severity.as_str(),
            filed.ml_severity.as_label(),
            filed.needs_alert,
            filed.record.title,
        );
    }

    let report = engine.run_sla_sweep(now)?;
    println!();
    println!(
        "sweep: {} overdue checked, {} escalated",
        report.checked, report.breaches
    );

    println!();
    println!("work queue (highest priority first):");
    for c in engine.queue()? {
        println!(
            "  [{:>3}] {:<9} {:<10} {}",
            c.priority_score,
            c.status.as_str(),
            c.severity.as_str(),
            c.title,
        );
    }

    if let Some(top) = engine.queue()?.first() {
        println!();
        println!("audit trail for '{}':", top.title);
        for entry in engine.events_for_complaint(&top.complaint_id)? {
            let payload: serde_json::Value = serde_json::from_str(&entry.payload)?;
            println!("  {} {}", entry.event_type, payload);
        }
    }

    let trend = engine.trend_report()?;
    println!();
    println!("trend: {}", trend.observation);

    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

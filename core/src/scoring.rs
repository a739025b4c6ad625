//! Hybrid priority scorer.
//!
//! Combines the user-asserted severity, the classifier's predicted
//! tier, and SLA time pressure into one 0–100 integer used to sort
//! the work queue. The classifier's opinion is weighted 1.5× the
//! user's self-report — it corrects both exaggeration and
//! under-reporting. The constants live in ScoringConfig; the defaults
//! are contractual (see the scoring tests for literal expected values).

use crate::{config::ScoringConfig, severity::PredictedSeverity};

/// Numeric weight for a severity label, either vocabulary.
/// Malformed labels weigh 10 rather than failing — scoring stays
/// total even with upstream data-entry inconsistencies.
pub fn severity_weight(label: &str) -> f64 {
    match label {
        "Critical" => 50.0,
        "High" | "HIGH" => 40.0,
        "Medium" | "MEDIUM" => 20.0,
        "Low" | "LOW" => 10.0,
        _ => 10.0,
    }
}

/// Compute the creation-time priority score.
///
/// base = (user_weight + ml_weight·predicted_weight) / 2, plus an SLA
/// urgency bonus, then scaled and clamped to [0, 100].
pub fn priority_score(
    user_severity: &str,
    ml_severity: PredictedSeverity,
    sla_hours: u32,
    config: &ScoringConfig,
) -> i64 {
    let user_w = severity_weight(user_severity);
    let ml_w = severity_weight(ml_severity.as_label());

    let mut total = (user_w + config.ml_weight * ml_w) / 2.0;

    // Closer deadline = higher urgency.
    if sla_hours <= config.immediate_cutoff_hours {
        total += config.immediate_bonus;
    } else if sla_hours <= config.urgent_cutoff_hours {
        total += config.urgent_bonus;
    } else if sla_hours <= config.same_day_cutoff_hours {
        total += config.same_day_bonus;
    }

    ((total * config.scale).round() as i64).clamp(0, 100)
}

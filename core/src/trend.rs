//! Trend analyzer — day-of-week frequency over complaint history.
//!
//! Descriptive statistics only: bucket creation timestamps by weekday
//! (UTC is the reporting timezone), pick the busiest day, and phrase
//! it as a one-line observation. No confidence is computed or claimed.

use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendInsight {
    pub riskiest_day: String,
    pub observation: String,
}

/// Find the weekday with the most complaints. Ties resolve to the day
/// first encountered in input order; an empty history defaults to
/// Monday.
pub fn analyze_trend(created_at: &[DateTime<Utc>]) -> TrendInsight {
    // (day, count) pairs in first-encounter order, so the tie-break
    // falls out of the scan below.
    let mut counts: Vec<(&'static str, u32)> = Vec::new();
    for ts in created_at {
        let day = day_name(ts.weekday());
        match counts.iter_mut().find(|(d, _)| *d == day) {
            Some((_, n)) => *n += 1,
            None => counts.push((day, 1)),
        }
    }

    let mut riskiest = "Monday";
    let mut max = 0u32;
    for (day, n) in &counts {
        if *n > max {
            max = *n;
            riskiest = day;
        }
    }

    TrendInsight {
        riskiest_day: riskiest.to_string(),
        observation: format!(
            "Historical data indicates a surge in reports on {riskiest}s."
        ),
    }
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

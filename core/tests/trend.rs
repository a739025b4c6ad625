//! Trend analyzer tests.

use chrono::{DateTime, TimeZone, Utc};
use hosteldesk_core::trend::analyze_trend;

fn on(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
}

/// Two Mondays and one Tuesday: Monday wins.
#[test]
fn majority_day_wins() {
    // 2024-01-01 and 2024-01-08 are Mondays, 2024-01-02 a Tuesday.
    let insight = analyze_trend(&[on(2024, 1, 1), on(2024, 1, 8), on(2024, 1, 2)]);
    assert_eq!(insight.riskiest_day, "Monday");
}

/// Equal counts resolve to whichever day appeared first in input order.
#[test]
fn tie_breaks_to_first_encountered() {
    let tuesday_first = analyze_trend(&[on(2024, 1, 2), on(2024, 1, 1)]);
    assert_eq!(tuesday_first.riskiest_day, "Tuesday");

    let monday_first = analyze_trend(&[on(2024, 1, 1), on(2024, 1, 2)]);
    assert_eq!(monday_first.riskiest_day, "Monday");
}

/// An empty history defaults to Monday.
#[test]
fn empty_history_defaults_monday() {
    let insight = analyze_trend(&[]);
    assert_eq!(insight.riskiest_day, "Monday");
    assert_eq!(
        insight.observation,
        "Historical data indicates a surge in reports on Mondays."
    );
}

/// The observation sentence names the riskiest day.
#[test]
fn observation_names_the_day() {
    // 2024-01-06 is a Saturday.
    let insight = analyze_trend(&[on(2024, 1, 6), on(2024, 1, 6), on(2024, 1, 1)]);
    assert_eq!(insight.riskiest_day, "Saturday");
    assert!(insight.observation.contains("Saturday"));
}

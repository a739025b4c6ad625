//! Engine configuration: the category rule table and scoring constants.
//!
//! Both are versionable artifacts: the defaults baked into this module
//! are the canonical values, and either can be overridden from a JSON
//! file. Changing the rule table changes scoring behavior system-wide,
//! so overrides are a deliberate operational act, not a code change.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One category's base severity and SLA window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub severity: Severity,
    pub sla_hours: u32,
}

/// Fallback for categories outside the known set: complaints must
/// always be scorable.
pub const FALLBACK_SEVERITY: Severity = Severity::Low;
pub const FALLBACK_SLA_HOURS: u32 = 48;

/// The canonical 23-category table.
const DEFAULT_RULES: [(&str, Severity, u32); 23] = [
    ("Air Conditioner (AC)", Severity::High, 4),
    ("Carpentry", Severity::Medium, 24),
    ("CCTV Complaints", Severity::High, 4),
    ("Civil Maintenance", Severity::Medium, 24),
    ("Electrical Maintenance", Severity::High, 4),
    ("Facility Management", Severity::Low, 48),
    ("Hostel AC Complaint", Severity::High, 4),
    ("Hostel Caretaker / Assistant wa", Severity::Medium, 12),
    ("Hostel Carpentry Work", Severity::Medium, 24),
    ("Hostel Electrical Work", Severity::High, 4),
    ("Hostel Food & Service", Severity::Medium, 12),
    ("Hostel Housekeeping", Severity::Medium, 12),
    ("Hostel Laundry Service", Severity::Medium, 24),
    ("Hostel Mess Hall Cleanliness", Severity::Medium, 12),
    ("Hostel Plumbing Work", Severity::High, 4),
    ("Hostel Wifi", Severity::High, 4),
    ("KMCH Medical Equipment", Severity::Critical, 1),
    ("Network and Internet", Severity::High, 4),
    ("Plumbing", Severity::High, 4),
    ("Printer Service", Severity::Low, 48),
    ("System Service", Severity::Low, 48),
    ("Toner Refilling", Severity::Low, 48),
    ("Website Updates", Severity::Low, 72),
];

/// Category → {base severity, SLA hours} lookup.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    rules: HashMap<String, (Severity, u32)>,
}

impl CategoryRules {
    /// Pure lookup; unknown categories fall back to {Low, 48}.
    pub fn rule_for(&self, category: &str) -> (Severity, u32) {
        self.rules
            .get(category)
            .copied()
            .unwrap_or((FALLBACK_SEVERITY, FALLBACK_SLA_HOURS))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn from_rules(rules: Vec<CategoryRule>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|r| (r.category, (r.severity, r.sla_hours)))
                .collect(),
        }
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(cat, sev, sla)| (cat.to_string(), (*sev, *sla)))
                .collect(),
        }
    }
}

/// Scoring constants. The formula shape is fixed; the constants are
/// tunable configuration. Defaults are the canonical values and must
/// stay bit-compatible with the documented scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Multiplier on the classifier's weight relative to the user's
    /// self-reported severity.
    pub ml_weight: f64,
    /// Final scale-up applied before clamping to [0, 100].
    pub scale: f64,
    pub immediate_cutoff_hours: u32,
    pub immediate_bonus: f64,
    pub urgent_cutoff_hours: u32,
    pub urgent_bonus: f64,
    pub same_day_cutoff_hours: u32,
    pub same_day_bonus: f64,
    /// Additive priority boost applied when the SLA sweep escalates.
    pub escalation_boost: i64,
    /// Creation-time score at or above which the caller should alert staff.
    pub alert_score_threshold: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ml_weight: 1.5,
            scale: 2.0,
            immediate_cutoff_hours: 1,
            immediate_bonus: 50.0,
            urgent_cutoff_hours: 4,
            urgent_bonus: 30.0,
            same_day_cutoff_hours: 12,
            same_day_bonus: 10.0,
            escalation_boost: 50,
            alert_score_threshold: 80,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Default)]
pub struct TriageConfig {
    pub categories: CategoryRules,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Deserialize)]
struct TriageConfigFile {
    #[serde(default)]
    categories: Option<Vec<CategoryRule>>,
    #[serde(default)]
    scoring: Option<ScoringConfig>,
}

impl TriageConfig {
    /// Load overrides from a JSON file. Sections not present keep
    /// their canonical defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: TriageConfigFile = serde_json::from_str(&content)?;
        Ok(Self {
            categories: file
                .categories
                .map(CategoryRules::from_rules)
                .unwrap_or_default(),
            scoring: file.scoring.unwrap_or_default(),
        })
    }
}

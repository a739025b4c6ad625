//! Severity tiers — user-asserted and classifier-predicted.
//!
//! Two distinct scales exist on purpose: the complaint record carries
//! a four-level user/rule severity ("Critical".."Low"), while the
//! classifier predicts a coarse three-level tier serialized uppercase
//! ("HIGH"/"MEDIUM"/"LOW"). The scorer accepts both vocabularies.

use serde::{Deserialize, Serialize};

/// User-asserted (or rule-table) severity stored on the complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Critical" => Some(Self::Critical),
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Classifier-predicted coarse tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PredictedSeverity {
    High,
    Medium,
    Low,
}

impl PredictedSeverity {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

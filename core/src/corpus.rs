//! Training corpus generator.
//!
//! Builds the labeled corpus the severity classifier trains on by
//! combinatorially pairing subject/verb/urgency vocabulary per tier,
//! with location-qualified variants sampled at per-tier rates. A fixed
//! set of hand-written edge cases is always appended, and the final
//! corpus is shuffled so training never sees label-clustered input.
//!
//! The generator is deterministic given the TriageRng seed. Duplicate
//! texts are allowed — repeated phrasings just reinforce token counts.

use crate::{rng::TriageRng, severity::PredictedSeverity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: PredictedSeverity,
}

pub const LOCATIONS: [&str; 9] = [
    "in my room",
    "in the bathroom",
    "in the corridor",
    "in the common area",
    "in the pantry",
    "on the 2nd floor",
    "near the entrance",
    "in block A",
    "",
];

// HIGH tier: safety, power, water damage.
pub const HIGH_SUBJECTS: [&str; 16] = [
    "fire",
    "smoke",
    "sparking",
    "short circuit",
    "gas leak",
    "explosion",
    "burning smell",
    "exposed wire",
    "flooding",
    "burst pipe",
    "ceiling collapse",
    "broken glass",
    "main door broken",
    "lock broken",
    "elevator stuck",
    "no electricity",
];
pub const HIGH_VERBS: [&str; 10] = [
    "detected",
    "happening",
    "started",
    "coming out",
    "is dangerous",
    "exploded",
    "collapsed",
    "shattered",
    "not locking",
    "stuck with people",
];
pub const HIGH_URGENCY: [&str; 5] = [
    "emergency",
    "urgent help needed",
    "danger",
    "critical situation",
    "help immediately",
];

// MEDIUM tier: functional and comfort fixtures.
pub const MEDIUM_SUBJECTS: [&str; 18] = [
    "fan",
    "light",
    "tube light",
    "ac",
    "air conditioner",
    "cooler",
    "water tap",
    "shower",
    "flush",
    "sink",
    "internet",
    "wifi",
    "lan port",
    "bed",
    "mattress",
    "table",
    "chair",
    "cupboard",
];
pub const MEDIUM_VERBS: [&str; 13] = [
    "not working",
    "broken",
    "leaking",
    "dripping",
    "slow",
    "flickering",
    "making noise",
    "wobbly",
    "jammed",
    "clogged",
    "no water",
    "very slow",
    "disconnected",
];

// LOW tier: cosmetic and minor issues.
pub const LOW_SUBJECTS: [&str; 12] = [
    "curtain",
    "curtain rod",
    "mirror",
    "dustbin",
    "paint",
    "wall",
    "floor tile",
    "window net",
    "notice board",
    "doormat",
    "soap stand",
    "towel rail",
];
pub const LOW_VERBS: [&str; 10] = [
    "dirty",
    "stained",
    "peeling off",
    "missing",
    "torn",
    "loose",
    "dusty",
    "needs cleaning",
    "slightly broken",
    "old",
];

/// Always appended regardless of sampling — phrasings the templates
/// never produce but real reports do.
pub const EDGE_CASES: [(&str, PredictedSeverity); 5] = [
    ("water is flooded in our room", PredictedSeverity::High),
    ("room full of water", PredictedSeverity::High),
    ("bathroom flooded", PredictedSeverity::High),
    ("lizard in room", PredictedSeverity::Low),
    ("ants on the table", PredictedSeverity::Low),
];

// Location-variant sampling rates per tier. Kept low so the corpus
// stays heavily skewed toward the bare vocabulary and the model
// generalizes on keyword presence rather than location phrases.
const HIGH_LOCATION_RATE: f64 = 0.3;
const MEDIUM_BARE_RATE: f64 = 0.5;
const MEDIUM_LOCATION_RATE: f64 = 0.2;
const LOW_LOCATION_RATE: f64 = 0.2;

/// Generate the full labeled corpus. Deterministic for a given rng seed.
pub fn generate_corpus(rng: &mut TriageRng) -> Vec<TrainingExample> {
    let mut corpus = Vec::new();

    for sub in HIGH_SUBJECTS {
        for verb in HIGH_VERBS {
            push(&mut corpus, format!("{sub} {verb}"), PredictedSeverity::High);
            for loc in LOCATIONS {
                if rng.chance(HIGH_LOCATION_RATE) {
                    push(
                        &mut corpus,
                        format!("{sub} {verb} {loc}"),
                        PredictedSeverity::High,
                    );
                }
            }
        }
        for urgent in HIGH_URGENCY {
            push(&mut corpus, format!("{urgent} {sub}"), PredictedSeverity::High);
        }
    }

    for sub in MEDIUM_SUBJECTS {
        for verb in MEDIUM_VERBS {
            push(
                &mut corpus,
                format!("{sub} is {verb}"),
                PredictedSeverity::Medium,
            );
            if rng.chance(MEDIUM_BARE_RATE) {
                push(&mut corpus, format!("{sub} {verb}"), PredictedSeverity::Medium);
            }
            for loc in LOCATIONS {
                if rng.chance(MEDIUM_LOCATION_RATE) {
                    push(
                        &mut corpus,
                        format!("{sub} {verb} {loc}"),
                        PredictedSeverity::Medium,
                    );
                }
            }
        }
    }

    for sub in LOW_SUBJECTS {
        for verb in LOW_VERBS {
            push(&mut corpus, format!("{sub} is {verb}"), PredictedSeverity::Low);
            for loc in LOCATIONS {
                if rng.chance(LOW_LOCATION_RATE) {
                    push(
                        &mut corpus,
                        format!("{sub} {verb} {loc}"),
                        PredictedSeverity::Low,
                    );
                }
            }
        }
    }

    for (text, label) in EDGE_CASES {
        push(&mut corpus, text.to_string(), label);
    }

    rng.shuffle(&mut corpus);
    corpus
}

fn push(corpus: &mut Vec<TrainingExample>, text: String, label: PredictedSeverity) {
    corpus.push(TrainingExample {
        text: text.trim().to_string(),
        label,
    });
}

//! Lexical severity classifier.
//!
//! Multinomial Naive Bayes over lowercase word tokens with additive
//! (Laplace) smoothing. Training counts per-label documents and token
//! frequencies; prediction maximizes the log posterior over the input
//! token multiset. Ties break by fixed label order High > Medium > Low.
//!
//! Given the same corpus, training always produces a model with the
//! same prediction behavior.

use crate::{
    corpus::{generate_corpus, TrainingExample},
    error::{TriageError, TriageResult},
    rng::TriageRng,
    severity::PredictedSeverity,
};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Seed for the process-wide default model's corpus.
pub const DEFAULT_CORPUS_SEED: u64 = 42;

/// Fixed label order — also the tie-break order during prediction.
const LABELS: [PredictedSeverity; 3] = [
    PredictedSeverity::High,
    PredictedSeverity::Medium,
    PredictedSeverity::Low,
];

/// A trained severity model. Cheap to query, immutable once built.
pub struct SeverityModel {
    doc_counts: [f64; 3],
    total_docs: f64,
    token_counts: [HashMap<String, f64>; 3],
    token_totals: [f64; 3],
    vocab_size: f64,
}

impl SeverityModel {
    /// Train from a labeled corpus. Fails on an empty corpus — callers
    /// must never fall back to an untrained model.
    pub fn train(corpus: &[TrainingExample]) -> TriageResult<Self> {
        if corpus.is_empty() {
            return Err(TriageError::InvalidCorpus);
        }

        let mut doc_counts = [0.0f64; 3];
        let mut token_counts: [HashMap<String, f64>; 3] = Default::default();
        let mut token_totals = [0.0f64; 3];
        let mut vocab: HashSet<String> = HashSet::new();

        for example in corpus {
            let li = label_index(example.label);
            doc_counts[li] += 1.0;
            for token in tokenize(&example.text) {
                *token_counts[li].entry(token.clone()).or_insert(0.0) += 1.0;
                token_totals[li] += 1.0;
                vocab.insert(token);
            }
        }

        Ok(Self {
            doc_counts,
            total_docs: corpus.len() as f64,
            token_counts,
            token_totals,
            vocab_size: vocab.len() as f64,
        })
    }

    /// Predict the severity tier for free text. Total: empty or
    /// whitespace-only input returns the stable Low default, and
    /// unseen tokens are absorbed by smoothing.
    pub fn predict(&self, text: &str) -> PredictedSeverity {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return PredictedSeverity::Low;
        }

        let mut best = PredictedSeverity::Low;
        let mut best_log_prob = f64::NEG_INFINITY;

        for (li, label) in LABELS.into_iter().enumerate() {
            // A label absent from the corpus can never win.
            if self.doc_counts[li] == 0.0 {
                continue;
            }
            let mut log_prob = (self.doc_counts[li] / self.total_docs).ln();
            let denominator = self.token_totals[li] + self.vocab_size;
            for token in &tokens {
                let count = self.token_counts[li].get(token).copied().unwrap_or(0.0);
                log_prob += ((count + 1.0) / denominator).ln();
            }
            // Strict > keeps the first label in LABELS order on ties.
            if log_prob > best_log_prob {
                best_log_prob = log_prob;
                best = label;
            }
        }

        best
    }
}

/// Process-wide shared model, trained lazily from the default-seed
/// corpus. The first caller trains; concurrent callers block on the
/// OnceLock and receive the same cached model. Callers that want an
/// explicitly owned model use generate_corpus + SeverityModel::train.
pub fn default_model() -> &'static SeverityModel {
    static MODEL: OnceLock<SeverityModel> = OnceLock::new();
    MODEL.get_or_init(|| {
        let mut rng = TriageRng::seed_from(DEFAULT_CORPUS_SEED);
        let corpus = generate_corpus(&mut rng);
        log::debug!("training default severity model from {} examples", corpus.len());
        SeverityModel::train(&corpus).expect("generated corpus is never empty")
    })
}

fn label_index(label: PredictedSeverity) -> usize {
    match label {
        PredictedSeverity::High => 0,
        PredictedSeverity::Medium => 1,
        PredictedSeverity::Low => 2,
    }
}

/// Lowercase alphanumeric word split.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_splits_on_non_alphanumeric() {
        assert_eq!(tokenize("Fan NOT working!"), vec!["fan", "not", "working"]);
        assert_eq!(tokenize("  \t "), Vec::<String>::new());
    }

    #[test]
    fn empty_corpus_is_rejected() {
        assert!(matches!(
            SeverityModel::train(&[]),
            Err(TriageError::InvalidCorpus)
        ));
    }
}

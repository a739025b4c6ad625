//! The triage engine — explicit, ordered operations over the
//! complaint store.
//!
//! OPERATION ORDER at creation (fixed, documented):
//!   1. Category rule lookup (base severity + SLA hours)
//!   2. Classifier prediction over "title description"
//!   3. Hybrid priority score
//!   4. Insert complaint (severity, score, deadline, status OPEN)
//!   5. Append ComplaintRaised + PriorityCalculated audit events
//!
//! RULES:
//!   - The engine owns an explicitly constructed model; nothing here
//!     reaches for hidden global state.
//!   - All writes to a complaint are paired with audit events in the
//!     same call — there are no implicit cross-cutting listeners.
//!   - The engine only ever transitions OPEN/IN_PROGRESS → ESCALATED;
//!     every other transition is an application decision routed
//!     through update_status.

use crate::{
    classifier::SeverityModel,
    complaint::{ComplaintRecord, FiledComplaint, NewComplaint, Status},
    config::TriageConfig,
    corpus::generate_corpus,
    error::TriageResult,
    event::{EventLogEntry, PriorityDetails, TriageEvent},
    rng::TriageRng,
    scoring::priority_score,
    store::TriageStore,
    sweep::{self, SweepReport},
    trend::{analyze_trend, TrendInsight},
    types::ComplaintId,
};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// How a creation-time score is labeled in the audit trail.
const SCORING_ALGORITHM: &str = "Weighted Hybrid v2 (ML)";

/// How many recent complaints feed the trend analyzer.
const TREND_WINDOW: u32 = 100;

pub struct TriageEngine {
    config: TriageConfig,
    model: SeverityModel,
    store: TriageStore,
}

impl TriageEngine {
    pub fn new(config: TriageConfig, model: SeverityModel, store: TriageStore) -> Self {
        Self {
            config,
            model,
            store,
        }
    }

    /// Build a fully wired engine: apply migrations, generate the
    /// seeded corpus, and train the model once. Training here means
    /// every later call path works with the same cached model.
    pub fn build(config: TriageConfig, corpus_seed: u64, store: TriageStore) -> TriageResult<Self> {
        store.migrate()?;
        let mut rng = TriageRng::seed_from(corpus_seed);
        let corpus = generate_corpus(&mut rng);
        let model = SeverityModel::train(&corpus)?;
        log::info!(
            "severity model trained from {} examples (seed {corpus_seed})",
            corpus.len()
        );
        Ok(Self::new(config, model, store))
    }

    /// File a new complaint at `now`. Returns the persisted record
    /// plus the classifier's opinion and the staff-alert flag.
    pub fn file_complaint(
        &self,
        new: NewComplaint,
        now: DateTime<Utc>,
    ) -> TriageResult<FiledComplaint> {
        let (base_severity, sla_hours) = self.config.categories.rule_for(&new.category);
        let severity = new.user_severity.unwrap_or(base_severity);

        let combined = format!("{} {}", new.title, new.description);
        let ml_severity = self.model.predict(&combined);

        let score = priority_score(
            severity.as_str(),
            ml_severity,
            sla_hours,
            &self.config.scoring,
        );
        let record = ComplaintRecord {
            complaint_id: Uuid::new_v4().to_string(),
            user_id: new.user_id,
            title: new.title,
            description: new.description,
            category: new.category,
            location: new.location,
            severity,
            status: Status::Open,
            priority_score: score,
            created_at: now,
            updated_at: now,
            sla_deadline: now + Duration::hours(sla_hours as i64),
        };
        self.store.insert_complaint(&record)?;

        self.store.append_event(&EventLogEntry::new(
            record.complaint_id.clone(),
            &TriageEvent::ComplaintRaised {
                complaint_id: record.complaint_id.clone(),
                title: record.title.clone(),
                severity: severity.as_str().to_string(),
                message: format!("New complaint logged at {}", record.location),
            },
            now,
        )?)?;
        self.store.append_event(&EventLogEntry::new(
            record.complaint_id.clone(),
            &TriageEvent::PriorityCalculated {
                complaint_id: record.complaint_id.clone(),
                new_score: score,
                reason: SCORING_ALGORITHM.to_string(),
                details: Some(PriorityDetails {
                    rule_severity: severity.as_str().to_string(),
                    ml_prediction: ml_severity.as_label().to_string(),
                    sla_hours,
                    algorithm: SCORING_ALGORITHM.to_string(),
                }),
            },
            now,
        )?)?;

        let needs_alert = score >= self.config.scoring.alert_score_threshold
            || matches!(severity, crate::severity::Severity::High | crate::severity::Severity::Critical);

        log::debug!(
            "filed {} category='{}' severity={} ml={} score={score}",
            record.complaint_id,
            record.category,
            severity.as_str(),
            ml_severity.as_label(),
        );

        Ok(FiledComplaint {
            record,
            ml_severity,
            needs_alert,
        })
    }

    /// Application-driven status transition (staff picking up or
    /// resolving a ticket). Logged like every other write.
    pub fn update_status(
        &self,
        complaint_id: &str,
        status: Status,
        now: DateTime<Utc>,
    ) -> TriageResult<ComplaintRecord> {
        let record = self.store.update_status(complaint_id, status, now)?;
        self.store.append_event(&EventLogEntry::new(
            record.complaint_id.clone(),
            &TriageEvent::StatusUpdated {
                complaint_id: record.complaint_id.clone(),
                status: status.as_str().to_string(),
                message: format!("Status updated to {}", status.as_str()),
            },
            now,
        )?)?;
        Ok(record)
    }

    /// One SLA escalation pass at `now`. See sweep.rs.
    pub fn run_sla_sweep(&self, now: DateTime<Utc>) -> TriageResult<SweepReport> {
        sweep::run_sweep(&self.store, now, &self.config.scoring)
    }

    /// The staff work queue, highest priority first.
    pub fn queue(&self) -> TriageResult<Vec<ComplaintRecord>> {
        self.store.queue()
    }

    pub fn complaints_for_user(&self, user_id: &str) -> TriageResult<Vec<ComplaintRecord>> {
        self.store.complaints_for_user(user_id)
    }

    pub fn get_complaint(&self, complaint_id: &str) -> TriageResult<ComplaintRecord> {
        self.store.get_complaint(complaint_id)
    }

    pub fn events_for_complaint(
        &self,
        complaint_id: &ComplaintId,
    ) -> TriageResult<Vec<crate::event::EventLogEntry>> {
        self.store.events_for_complaint(complaint_id)
    }

    /// Day-of-week trend over the most recent complaints.
    pub fn trend_report(&self) -> TriageResult<TrendInsight> {
        let timestamps = self.store.recent_created_at(TREND_WINDOW)?;
        Ok(analyze_trend(&timestamps))
    }

    /// Direct store access for tests and tooling only.
    pub fn store(&self) -> &TriageStore {
        &self.store
    }
}

//! hosteldesk-core: the triage engine behind the hostel-maintenance
//! ticketing desk.
//!
//! Students file complaints; this crate assigns a severity and a
//! 0–100 priority score (lexical classifier + category rule table +
//! SLA urgency), escalates tickets that miss their deadline, and
//! reports a simple day-of-week trend. Everything around it — forms,
//! auth, delivery — belongs to the hosting application.

pub mod classifier;
pub mod complaint;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod event;
pub mod rng;
pub mod scoring;
pub mod severity;
pub mod store;
pub mod sweep;
pub mod trend;
pub mod types;

//! derivapp-audit
//!
//! Structured activity events: who did what to which record. Events are
//! emitted via `tracing` and persisted as activity-log documents.

pub mod events;

//! derivapp-risk
//!
//! The risk scorer: maps a referral's follow-up history, priority, and
//! open/closed status to a normalized 0–100 score and one of four alert
//! levels. Pure computation — no I/O, no failure modes.

pub mod score;

pub use score::{assess, level_for, Assessment};

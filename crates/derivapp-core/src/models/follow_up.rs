use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A seguimiento — a logged contact, visit, or evaluation tied to a
/// referral, with a qualitative outcome.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FollowUp {
    pub id: Uuid,
    pub referral_id: Uuid,
    pub outcome: FollowUpOutcome,
    pub notes: Option<String>,
    pub occurred_at: jiff::civil::Date,
    /// Subject id of the user who recorded the contact.
    pub recorded_by: String,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(from = "String")]
#[ts(export)]
pub enum FollowUpOutcome {
    #[serde(rename = "positivo")]
    Positive,
    #[serde(rename = "negativo")]
    Negative,
    #[serde(rename = "neutro")]
    Neutral,
    #[serde(rename = "pendiente")]
    Pending,
}

impl FollowUpOutcome {
    /// Classify a raw outcome string, case-insensitively. Anything outside
    /// the known vocabulary counts as neutral.
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positivo" => FollowUpOutcome::Positive,
            "negativo" => FollowUpOutcome::Negative,
            "neutro" => FollowUpOutcome::Neutral,
            "pendiente" => FollowUpOutcome::Pending,
            _ => FollowUpOutcome::Neutral,
        }
    }
}

impl From<String> for FollowUpOutcome {
    fn from(raw: String) -> Self {
        FollowUpOutcome::classify(&raw)
    }
}

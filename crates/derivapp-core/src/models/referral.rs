use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A derivación — a case opened for a student requiring psychosocial
/// follow-up.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Referral {
    pub id: Uuid,
    pub student_id: Uuid,
    pub reason: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: ReferralStatus,
    /// Subject id of the user who opened the case.
    pub referred_by: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Referral {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.reason.trim().is_empty() {
            return Err(CoreError::MissingField("reason".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(from = "String")]
#[ts(export)]
pub enum Priority {
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "baja")]
    Low,
}

impl Priority {
    /// Classify a raw priority string, case-insensitively. Anything
    /// outside the known vocabulary counts as low.
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "alta" => Priority::High,
            "media" => Priority::Medium,
            "baja" => Priority::Low,
            _ => Priority::Low,
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        Priority::classify(&raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(from = "String")]
#[ts(export)]
pub enum ReferralStatus {
    #[serde(rename = "abierta")]
    Open,
    #[serde(rename = "cerrada")]
    Closed,
}

impl ReferralStatus {
    /// Classify a raw status string, case-insensitively. Anything outside
    /// the known vocabulary counts as open.
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "abierta" => ReferralStatus::Open,
            "cerrada" => ReferralStatus::Closed,
            _ => ReferralStatus::Open,
        }
    }
}

impl From<String> for ReferralStatus {
    fn from(raw: String) -> Self {
        ReferralStatus::classify(&raw)
    }
}

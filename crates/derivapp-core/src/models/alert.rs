use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A persisted risk assessment attached to a referral.
///
/// Assessments are append-only: recomputation adds a new record, it never
/// rewrites an existing one. Readers order by `computed_at`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Alert {
    pub id: Uuid,
    pub referral_id: Uuid,
    #[serde(rename = "scoreReal")]
    pub score_real: f64,
    #[serde(rename = "scoreNormalizado")]
    pub score_normalizado: f64,
    #[serde(rename = "nivelAlerta")]
    pub nivel_alerta: AlertLevel,
    pub computed_at: jiff::Timestamp,
    pub created_at: jiff::Timestamp,
}

/// Four ordered risk buckets derived from the normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AlertLevel {
    #[serde(rename = "Alerta crítica")]
    Critical,
    #[serde(rename = "Alerta alta")]
    High,
    #[serde(rename = "Alerta moderada")]
    Moderate,
    #[serde(rename = "Sin riesgo / Bajo")]
    Low,
}

impl AlertLevel {
    pub fn label(self) -> &'static str {
        match self {
            AlertLevel::Critical => "Alerta crítica",
            AlertLevel::High => "Alerta alta",
            AlertLevel::Moderate => "Alerta moderada",
            AlertLevel::Low => "Sin riesgo / Bajo",
        }
    }

    /// High and critical alerts trigger outbound notifications.
    pub fn is_elevated(self) -> bool {
        matches!(self, AlertLevel::Critical | AlertLevel::High)
    }
}

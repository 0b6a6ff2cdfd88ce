use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A planned or completed action on a referral, e.g. "entrevista
/// familiar" or "visita domiciliaria".
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Intervention {
    pub id: Uuid,
    pub referral_id: Uuid,
    pub kind: String,
    pub description: Option<String>,
    pub scheduled_for: Option<jiff::civil::Date>,
    pub completed: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

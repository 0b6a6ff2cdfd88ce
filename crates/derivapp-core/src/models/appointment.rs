use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Appointment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub referral_id: Option<Uuid>,
    pub starts_at: jiff::Timestamp,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(from = "String")]
#[ts(export)]
pub enum AppointmentStatus {
    #[serde(rename = "programada")]
    Scheduled,
    #[serde(rename = "realizada")]
    Held,
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl AppointmentStatus {
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "programada" => AppointmentStatus::Scheduled,
            "realizada" => AppointmentStatus::Held,
            "cancelada" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Scheduled,
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(raw: String) -> Self {
        AppointmentStatus::classify(&raw)
    }
}

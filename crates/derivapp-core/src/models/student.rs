use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Course/section label, e.g. "3° Medio B".
    pub grade: String,
    pub guardian_contact: Option<String>,
    pub notes: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Student {
    /// Check required free-text fields before persisting.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.first_name.trim().is_empty() {
            return Err(CoreError::MissingField("first_name".to_string()));
        }
        if self.last_name.trim().is_empty() {
            return Err(CoreError::MissingField("last_name".to_string()));
        }
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

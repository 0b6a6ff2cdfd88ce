use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A free-text form or report document, optionally tied to a student
/// and/or a referral.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Form {
    pub id: Uuid,
    pub title: String,
    pub student_id: Option<Uuid>,
    pub referral_id: Option<Uuid>,
    pub content: String,
    /// True when the content started from an assist-generated draft.
    pub generated: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Form {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::MissingField("title".to_string()));
        }
        Ok(())
    }
}

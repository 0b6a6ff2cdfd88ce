use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// A structured activity event recording an API action.
///
/// Events are both logged via `tracing` and written to the activity-log
/// collection so they can be listed from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: Uuid,
    /// Subject id of the acting user.
    pub actor_sub: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub details: Option<serde_json::Value>,
    pub occurred_at: jiff::Timestamp,
}

impl ActivityEvent {
    pub fn new(
        actor_sub: impl Into<String>,
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            actor_sub: actor_sub.into(),
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            details: None,
            occurred_at: jiff::Timestamp::now(),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this event via tracing.
    pub fn emit(&self) {
        info!(
            activity.actor_sub = %self.actor_sub,
            activity.action = %self.action,
            activity.resource_type = %self.resource_type,
            activity.resource_id = %self.resource_id,
            "activity event"
        );
    }
}

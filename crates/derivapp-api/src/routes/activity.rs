use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::warn;

use derivapp_audit::events::ActivityEvent;
use derivapp_auth::permissions::Permission;
use derivapp_core::store_keys;
use derivapp_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::{ensure, AuthUser};
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 100;

/// Emit and persist an activity event.
///
/// Persistence is best-effort: a storage failure must not fail the
/// mutation the event describes, so it is logged and swallowed.
pub async fn record(state: &AppState, event: ActivityEvent) {
    event.emit();

    let key = store_keys::activity(event.id);
    if let Err(e) = docs::save_doc(&state.s3, &state.bucket, &key, &event).await {
        warn!(error = %e, "failed to persist activity event");
    }
}

#[derive(Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

pub async fn list_activity(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityEvent>>, ApiError> {
    ensure(&user, Permission::ReadActivity)?;

    let keys = objects::list_objects(&state.s3, &state.bucket, store_keys::ACTIVITY_PREFIX).await?;
    let mut events = Vec::new();
    for key in &keys {
        let event: ActivityEvent = docs::load_doc(&state.s3, &state.bucket, key).await?;
        events.push(event);
    }

    events.sort_by_key(|e| e.occurred_at);
    events.reverse();
    events.truncate(query.limit.unwrap_or(DEFAULT_LIMIT));

    Ok(Json(events))
}

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use derivapp_audit::events::ActivityEvent;
use derivapp_auth::permissions::Permission;
use derivapp_core::models::follow_up::{FollowUp, FollowUpOutcome};
use derivapp_core::models::referral::Referral;
use derivapp_core::store_keys;
use derivapp_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::{ensure, AuthUser};
use crate::routes::activity;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateFollowUp {
    /// positivo | negativo | neutro | pendiente; anything else counts as
    /// neutro.
    pub outcome: String,
    pub notes: Option<String>,
    pub occurred_at: jiff::civil::Date,
}

/// A referral with no follow-ups yet lists as empty, never as an error.
pub async fn list_follow_ups(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(referral_id): Path<Uuid>,
) -> Result<Json<Vec<FollowUp>>, ApiError> {
    ensure(&user, Permission::ReadReferrals)?;

    let keys = objects::list_objects(
        &state.s3,
        &state.bucket,
        &store_keys::follow_ups_prefix(referral_id),
    )
    .await?;

    let mut follow_ups = Vec::new();
    for key in &keys {
        let follow_up: FollowUp = docs::load_doc(&state.s3, &state.bucket, key).await?;
        follow_ups.push(follow_up);
    }
    follow_ups.sort_by_key(|f| f.occurred_at);

    Ok(Json(follow_ups))
}

pub async fn create_follow_up(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(referral_id): Path<Uuid>,
    Json(payload): Json<CreateFollowUp>,
) -> Result<Json<FollowUp>, ApiError> {
    ensure(&user, Permission::ManageFollowUps)?;

    // 404 when the referral itself is missing.
    let _referral: Referral =
        docs::load_doc(&state.s3, &state.bucket, &store_keys::referral(referral_id)).await?;

    let follow_up = FollowUp {
        id: Uuid::new_v4(),
        referral_id,
        outcome: FollowUpOutcome::classify(&payload.outcome),
        notes: payload.notes,
        occurred_at: payload.occurred_at,
        recorded_by: user.sub.clone(),
        created_at: jiff::Timestamp::now(),
    };

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &store_keys::follow_up(referral_id, follow_up.id),
        &follow_up,
    )
    .await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "create", "follow_up", follow_up.id.to_string()),
    )
    .await;

    Ok(Json(follow_up))
}

pub async fn get_follow_up(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((referral_id, follow_up_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<FollowUp>, ApiError> {
    ensure(&user, Permission::ReadReferrals)?;

    let follow_up: FollowUp = docs::load_doc(
        &state.s3,
        &state.bucket,
        &store_keys::follow_up(referral_id, follow_up_id),
    )
    .await?;
    Ok(Json(follow_up))
}

pub async fn delete_follow_up(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((referral_id, follow_up_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<()>, ApiError> {
    ensure(&user, Permission::DeleteRecords)?;

    objects::delete_object(
        &state.s3,
        &state.bucket,
        &store_keys::follow_up(referral_id, follow_up_id),
    )
    .await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "delete", "follow_up", follow_up_id.to_string()),
    )
    .await;

    Ok(Json(()))
}

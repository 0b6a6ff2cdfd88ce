use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use derivapp_audit::events::ActivityEvent;
use derivapp_auth::permissions::Permission;
use derivapp_core::models::intervention::Intervention;
use derivapp_core::models::referral::Referral;
use derivapp_core::store_keys;
use derivapp_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::{ensure, AuthUser};
use crate::routes::activity;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateIntervention {
    pub kind: String,
    pub description: Option<String>,
    pub scheduled_for: Option<jiff::civil::Date>,
}

#[derive(Deserialize)]
pub struct UpdateIntervention {
    pub kind: Option<String>,
    pub description: Option<String>,
    pub scheduled_for: Option<jiff::civil::Date>,
    pub completed: Option<bool>,
}

pub async fn list_interventions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(referral_id): Path<Uuid>,
) -> Result<Json<Vec<Intervention>>, ApiError> {
    ensure(&user, Permission::ReadReferrals)?;

    let keys = objects::list_objects(
        &state.s3,
        &state.bucket,
        &store_keys::interventions_prefix(referral_id),
    )
    .await?;

    let mut interventions = Vec::new();
    for key in &keys {
        let intervention: Intervention = docs::load_doc(&state.s3, &state.bucket, key).await?;
        interventions.push(intervention);
    }
    interventions.sort_by_key(|i| i.created_at);

    Ok(Json(interventions))
}

pub async fn create_intervention(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(referral_id): Path<Uuid>,
    Json(payload): Json<CreateIntervention>,
) -> Result<Json<Intervention>, ApiError> {
    ensure(&user, Permission::ManageInterventions)?;

    let _referral: Referral =
        docs::load_doc(&state.s3, &state.bucket, &store_keys::referral(referral_id)).await?;

    let now = jiff::Timestamp::now();
    let intervention = Intervention {
        id: Uuid::new_v4(),
        referral_id,
        kind: payload.kind,
        description: payload.description,
        scheduled_for: payload.scheduled_for,
        completed: false,
        created_at: now,
        updated_at: now,
    };

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &store_keys::intervention(referral_id, intervention.id),
        &intervention,
    )
    .await?;

    activity::record(
        &state,
        ActivityEvent::new(
            &user.sub,
            "create",
            "intervention",
            intervention.id.to_string(),
        ),
    )
    .await;

    Ok(Json(intervention))
}

pub async fn get_intervention(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((referral_id, intervention_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Intervention>, ApiError> {
    ensure(&user, Permission::ReadReferrals)?;

    let intervention: Intervention = docs::load_doc(
        &state.s3,
        &state.bucket,
        &store_keys::intervention(referral_id, intervention_id),
    )
    .await?;
    Ok(Json(intervention))
}

pub async fn update_intervention(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((referral_id, intervention_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateIntervention>,
) -> Result<Json<Intervention>, ApiError> {
    ensure(&user, Permission::ManageInterventions)?;

    let key = store_keys::intervention(referral_id, intervention_id);
    let mut intervention: Intervention = docs::load_doc(&state.s3, &state.bucket, &key).await?;

    if let Some(kind) = payload.kind {
        intervention.kind = kind;
    }
    if let Some(description) = payload.description {
        intervention.description = Some(description);
    }
    if let Some(scheduled_for) = payload.scheduled_for {
        intervention.scheduled_for = Some(scheduled_for);
    }
    if let Some(completed) = payload.completed {
        intervention.completed = completed;
    }
    intervention.updated_at = jiff::Timestamp::now();

    docs::save_doc(&state.s3, &state.bucket, &key, &intervention).await?;

    activity::record(
        &state,
        ActivityEvent::new(
            &user.sub,
            "update",
            "intervention",
            intervention_id.to_string(),
        ),
    )
    .await;

    Ok(Json(intervention))
}

pub async fn delete_intervention(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((referral_id, intervention_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<()>, ApiError> {
    ensure(&user, Permission::DeleteRecords)?;

    objects::delete_object(
        &state.s3,
        &state.bucket,
        &store_keys::intervention(referral_id, intervention_id),
    )
    .await?;

    activity::record(
        &state,
        ActivityEvent::new(
            &user.sub,
            "delete",
            "intervention",
            intervention_id.to_string(),
        ),
    )
    .await;

    Ok(Json(()))
}

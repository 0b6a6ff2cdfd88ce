use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use derivapp_audit::events::ActivityEvent;
use derivapp_auth::permissions::Permission;
use derivapp_core::models::referral::{Priority, Referral, ReferralStatus};
use derivapp_core::models::student::Student;
use derivapp_core::store_keys;
use derivapp_notify::WebhookEvent;
use derivapp_storage::error::StorageError;
use derivapp_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::{ensure, AuthUser};
use crate::routes::activity;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateReferral {
    pub student_id: Uuid,
    pub reason: String,
    pub description: Option<String>,
    /// alta | media | baja; anything else classifies to baja.
    pub priority: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateReferral {
    pub reason: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    /// abierta | cerrada; anything else classifies to abierta.
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct ReferralQuery {
    pub student_id: Option<Uuid>,
}

pub async fn list_referrals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ReferralQuery>,
) -> Result<Json<Vec<Referral>>, ApiError> {
    ensure(&user, Permission::ReadReferrals)?;

    let keys = objects::list_objects(&state.s3, &state.bucket, store_keys::REFERRALS_PREFIX).await?;
    let mut referrals = Vec::new();
    for key in &keys {
        let referral: Referral = docs::load_doc(&state.s3, &state.bucket, key).await?;
        if let Some(student_id) = query.student_id
            && referral.student_id != student_id
        {
            continue;
        }
        referrals.push(referral);
    }

    Ok(Json(referrals))
}

pub async fn get_referral(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Referral>, ApiError> {
    ensure(&user, Permission::ReadReferrals)?;

    let referral: Referral =
        docs::load_doc(&state.s3, &state.bucket, &store_keys::referral(id)).await?;
    Ok(Json(referral))
}

pub async fn create_referral(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateReferral>,
) -> Result<Json<Referral>, ApiError> {
    ensure(&user, Permission::CreateReferrals)?;

    // A referral must point at an existing student.
    let student: Student = docs::load_doc(
        &state.s3,
        &state.bucket,
        &store_keys::student(payload.student_id),
    )
    .await
    .map_err(|e| match e {
        StorageError::NotFound { .. } => ApiError::BadRequest("student does not exist".to_string()),
        other => other.into(),
    })?;

    let now = jiff::Timestamp::now();
    let referral = Referral {
        id: Uuid::new_v4(),
        student_id: payload.student_id,
        reason: payload.reason,
        description: payload.description,
        priority: payload
            .priority
            .as_deref()
            .map(Priority::classify)
            .unwrap_or(Priority::Low),
        status: ReferralStatus::Open,
        referred_by: user.sub.clone(),
        created_at: now,
        updated_at: now,
    };
    referral.validate()?;

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &store_keys::referral(referral.id),
        &referral,
    )
    .await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "create", "referral", referral.id.to_string()),
    )
    .await;

    state.notify.emit(WebhookEvent::referral_created(
        referral.id,
        serde_json::json!({
            "student": student.full_name(),
            "priority": referral.priority,
            "reason": referral.reason,
        }),
    ));

    Ok(Json(referral))
}

pub async fn update_referral(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReferral>,
) -> Result<Json<Referral>, ApiError> {
    ensure(&user, Permission::ManageReferrals)?;

    let key = store_keys::referral(id);
    let mut referral: Referral = docs::load_doc(&state.s3, &state.bucket, &key).await?;

    if let Some(reason) = payload.reason {
        referral.reason = reason;
    }
    if let Some(description) = payload.description {
        referral.description = Some(description);
    }
    if let Some(priority) = payload.priority.as_deref() {
        referral.priority = Priority::classify(priority);
    }
    if let Some(status) = payload.status.as_deref() {
        referral.status = ReferralStatus::classify(status);
    }
    referral.updated_at = jiff::Timestamp::now();
    referral.validate()?;

    docs::save_doc(&state.s3, &state.bucket, &key, &referral).await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "update", "referral", id.to_string()),
    )
    .await;

    Ok(Json(referral))
}

pub async fn delete_referral(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    ensure(&user, Permission::DeleteRecords)?;

    objects::delete_object(&state.s3, &state.bucket, &store_keys::referral(id)).await?;

    // A referral takes its dependent records with it.
    objects::delete_objects_by_prefix(
        &state.s3,
        &state.bucket,
        &store_keys::follow_ups_prefix(id),
    )
    .await?;
    objects::delete_objects_by_prefix(
        &state.s3,
        &state.bucket,
        &store_keys::interventions_prefix(id),
    )
    .await?;
    objects::delete_objects_by_prefix(&state.s3, &state.bucket, &store_keys::alerts_prefix(id))
        .await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "delete", "referral", id.to_string()),
    )
    .await;

    Ok(Json(()))
}

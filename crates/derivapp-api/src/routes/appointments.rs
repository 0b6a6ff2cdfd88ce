use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use derivapp_audit::events::ActivityEvent;
use derivapp_auth::permissions::Permission;
use derivapp_core::models::appointment::{Appointment, AppointmentStatus};
use derivapp_core::models::student::Student;
use derivapp_core::store_keys;
use derivapp_storage::error::StorageError;
use derivapp_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::{ensure, AuthUser};
use crate::routes::activity;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateAppointment {
    pub student_id: Uuid,
    pub referral_id: Option<Uuid>,
    pub starts_at: jiff::Timestamp,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAppointment {
    pub starts_at: Option<jiff::Timestamp>,
    pub location: Option<String>,
    pub notes: Option<String>,
    /// programada | realizada | cancelada; anything else classifies to
    /// programada.
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct AppointmentQuery {
    pub student_id: Option<Uuid>,
}

pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    ensure(&user, Permission::ReadAppointments)?;

    let keys =
        objects::list_objects(&state.s3, &state.bucket, store_keys::APPOINTMENTS_PREFIX).await?;
    let mut appointments = Vec::new();
    for key in &keys {
        let appointment: Appointment = docs::load_doc(&state.s3, &state.bucket, key).await?;
        if let Some(student_id) = query.student_id
            && appointment.student_id != student_id
        {
            continue;
        }
        appointments.push(appointment);
    }
    appointments.sort_by_key(|a| a.starts_at);

    Ok(Json(appointments))
}

pub async fn get_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, ApiError> {
    ensure(&user, Permission::ReadAppointments)?;

    let appointment: Appointment =
        docs::load_doc(&state.s3, &state.bucket, &store_keys::appointment(id)).await?;
    Ok(Json(appointment))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateAppointment>,
) -> Result<Json<Appointment>, ApiError> {
    ensure(&user, Permission::CreateAppointments)?;

    let _student: Student = docs::load_doc(
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
    let appointment = Appointment {
        id: Uuid::new_v4(),
        student_id: payload.student_id,
        referral_id: payload.referral_id,
        starts_at: payload.starts_at,
        location: payload.location,
        notes: payload.notes,
        status: AppointmentStatus::Scheduled,
        created_at: now,
        updated_at: now,
    };

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &store_keys::appointment(appointment.id),
        &appointment,
    )
    .await?;

    activity::record(
        &state,
        ActivityEvent::new(
            &user.sub,
            "create",
            "appointment",
            appointment.id.to_string(),
        ),
    )
    .await;

    Ok(Json(appointment))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointment>,
) -> Result<Json<Appointment>, ApiError> {
    ensure(&user, Permission::ManageAppointments)?;

    let key = store_keys::appointment(id);
    let mut appointment: Appointment = docs::load_doc(&state.s3, &state.bucket, &key).await?;

    if let Some(starts_at) = payload.starts_at {
        appointment.starts_at = starts_at;
    }
    if let Some(location) = payload.location {
        appointment.location = Some(location);
    }
    if let Some(notes) = payload.notes {
        appointment.notes = Some(notes);
    }
    if let Some(status) = payload.status.as_deref() {
        appointment.status = AppointmentStatus::classify(status);
    }
    appointment.updated_at = jiff::Timestamp::now();

    docs::save_doc(&state.s3, &state.bucket, &key, &appointment).await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "update", "appointment", id.to_string()),
    )
    .await;

    Ok(Json(appointment))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    ensure(&user, Permission::DeleteRecords)?;

    objects::delete_object(&state.s3, &state.bucket, &store_keys::appointment(id)).await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "delete", "appointment", id.to_string()),
    )
    .await;

    Ok(Json(()))
}

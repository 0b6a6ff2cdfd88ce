use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use derivapp_audit::events::ActivityEvent;
use derivapp_auth::permissions::Permission;
use derivapp_core::models::student::Student;
use derivapp_core::store_keys;
use derivapp_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::{ensure, AuthUser};
use crate::routes::activity;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StudentPayload {
    pub first_name: String,
    pub last_name: String,
    pub grade: String,
    pub guardian_contact: Option<String>,
    pub notes: Option<String>,
}

pub async fn list_students(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Student>>, ApiError> {
    ensure(&user, Permission::ReadStudents)?;

    let keys = objects::list_objects(&state.s3, &state.bucket, store_keys::STUDENTS_PREFIX).await?;
    let mut students = Vec::new();
    for key in &keys {
        let student: Student = docs::load_doc(&state.s3, &state.bucket, key).await?;
        students.push(student);
    }

    Ok(Json(students))
}

pub async fn get_student(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, ApiError> {
    ensure(&user, Permission::ReadStudents)?;

    let student: Student =
        docs::load_doc(&state.s3, &state.bucket, &store_keys::student(id)).await?;
    Ok(Json(student))
}

pub async fn create_student(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<StudentPayload>,
) -> Result<Json<Student>, ApiError> {
    ensure(&user, Permission::ManageStudents)?;

    let now = jiff::Timestamp::now();
    let student = Student {
        id: Uuid::new_v4(),
        first_name: payload.first_name,
        last_name: payload.last_name,
        grade: payload.grade,
        guardian_contact: payload.guardian_contact,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    };
    student.validate()?;

    docs::save_doc(
        &state.s3,
        &state.bucket,
        &store_keys::student(student.id),
        &student,
    )
    .await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "create", "student", student.id.to_string()),
    )
    .await;

    Ok(Json(student))
}

pub async fn update_student(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StudentPayload>,
) -> Result<Json<Student>, ApiError> {
    ensure(&user, Permission::ManageStudents)?;

    let key = store_keys::student(id);
    let mut student: Student = docs::load_doc(&state.s3, &state.bucket, &key).await?;

    student.first_name = payload.first_name;
    student.last_name = payload.last_name;
    student.grade = payload.grade;
    student.guardian_contact = payload.guardian_contact;
    student.notes = payload.notes;
    student.updated_at = jiff::Timestamp::now();
    student.validate()?;

    docs::save_doc(&state.s3, &state.bucket, &key, &student).await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "update", "student", id.to_string()),
    )
    .await;

    Ok(Json(student))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    ensure(&user, Permission::DeleteRecords)?;

    objects::delete_object(&state.s3, &state.bucket, &store_keys::student(id)).await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "delete", "student", id.to_string()),
    )
    .await;

    Ok(Json(()))
}

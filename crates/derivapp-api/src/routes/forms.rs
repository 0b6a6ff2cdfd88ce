use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use derivapp_assist::{draft_form_content, FormDraftRequest};
use derivapp_audit::events::ActivityEvent;
use derivapp_auth::permissions::Permission;
use derivapp_core::models::form::Form;
use derivapp_core::store_keys;
use derivapp_storage::{docs, objects};

use crate::error::ApiError;
use crate::middleware::auth::{ensure, AuthUser};
use crate::routes::activity;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FormPayload {
    pub title: String,
    pub student_id: Option<Uuid>,
    pub referral_id: Option<Uuid>,
    pub content: String,
    #[serde(default)]
    pub generated: bool,
}

/// An assist draft. Nothing is persisted until the client saves it as a
/// form.
#[derive(Serialize)]
pub struct FormDraft {
    pub title: String,
    pub content: String,
    pub generated: bool,
}

pub async fn list_forms(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Form>>, ApiError> {
    ensure(&user, Permission::ReadForms)?;

    let keys = objects::list_objects(&state.s3, &state.bucket, store_keys::FORMS_PREFIX).await?;
    let mut forms = Vec::new();
    for key in &keys {
        let form: Form = docs::load_doc(&state.s3, &state.bucket, key).await?;
        forms.push(form);
    }

    Ok(Json(forms))
}

pub async fn get_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Form>, ApiError> {
    ensure(&user, Permission::ReadForms)?;

    let form: Form = docs::load_doc(&state.s3, &state.bucket, &store_keys::form(id)).await?;
    Ok(Json(form))
}

pub async fn create_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<FormPayload>,
) -> Result<Json<Form>, ApiError> {
    ensure(&user, Permission::ManageForms)?;

    let now = jiff::Timestamp::now();
    let form = Form {
        id: Uuid::new_v4(),
        title: payload.title,
        student_id: payload.student_id,
        referral_id: payload.referral_id,
        content: payload.content,
        generated: payload.generated,
        created_at: now,
        updated_at: now,
    };
    form.validate()?;

    docs::save_doc(&state.s3, &state.bucket, &store_keys::form(form.id), &form).await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "create", "form", form.id.to_string()),
    )
    .await;

    Ok(Json(form))
}

pub async fn update_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FormPayload>,
) -> Result<Json<Form>, ApiError> {
    ensure(&user, Permission::ManageForms)?;

    let key = store_keys::form(id);
    let mut form: Form = docs::load_doc(&state.s3, &state.bucket, &key).await?;

    form.title = payload.title;
    form.student_id = payload.student_id;
    form.referral_id = payload.referral_id;
    form.content = payload.content;
    form.updated_at = jiff::Timestamp::now();
    form.validate()?;

    docs::save_doc(&state.s3, &state.bucket, &key, &form).await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "update", "form", id.to_string()),
    )
    .await;

    Ok(Json(form))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    ensure(&user, Permission::DeleteRecords)?;

    objects::delete_object(&state.s3, &state.bucket, &store_keys::form(id)).await?;

    activity::record(
        &state,
        ActivityEvent::new(&user.sub, "delete", "form", id.to_string()),
    )
    .await;

    Ok(Json(()))
}

/// Build a templated starting draft for a form.
pub async fn draft_form(
    Extension(user): Extension<AuthUser>,
    Json(request): Json<FormDraftRequest>,
) -> Result<Json<FormDraft>, ApiError> {
    ensure(&user, Permission::ManageForms)?;

    let content = draft_form_content(&request);
    Ok(Json(FormDraft {
        title: request.title,
        content,
        generated: true,
    }))
}

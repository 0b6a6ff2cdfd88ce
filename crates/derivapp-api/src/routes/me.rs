use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use derivapp_auth::permissions::Role;
use derivapp_auth::profile;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MeResponse {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Role,
}

/// Resolve the caller's profile from the identity provider.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>, ApiError> {
    let profile =
        profile::get_user_profile(&state.cognito, &state.user_pool_id, &user.sub).await?;

    Ok(Json(MeResponse {
        sub: profile.sub,
        email: profile.email,
        name: profile.name,
        role: profile.role,
    }))
}

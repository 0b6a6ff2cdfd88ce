use aws_sdk_cognitoidentityprovider::Client;
use tracing::info;

use crate::error::AuthError;
use crate::permissions::Role;

/// User profile resolved from the identity provider.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Role,
}

/// Look up a user's profile in the Cognito user pool.
pub async fn get_user_profile(
    client: &Client,
    user_pool_id: &str,
    username: &str,
) -> Result<UserProfile, AuthError> {
    info!(username = username, "looking up user profile");

    let resp = client
        .admin_get_user()
        .user_pool_id(user_pool_id)
        .username(username)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_user_not_found_exception() {
                AuthError::UserNotFound(username.to_string())
            } else {
                AuthError::Cognito(err.to_string())
            }
        })?;

    let mut sub = username.to_string();
    let mut email = None;
    let mut name = None;
    let mut role = Role::Teacher;

    for attr in resp.user_attributes() {
        match (attr.name(), attr.value()) {
            ("sub", Some(v)) => sub = v.to_string(),
            ("email", Some(v)) => email = Some(v.to_string()),
            ("name", Some(v)) => name = Some(v.to_string()),
            ("custom:role", Some(v)) => role = Role::classify(v),
            _ => {}
        }
    }

    Ok(UserProfile {
        sub,
        email,
        name,
        role,
    })
}

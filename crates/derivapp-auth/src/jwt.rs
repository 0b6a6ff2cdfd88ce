use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::AuthError;
use crate::permissions::Role;

/// Claims extracted from a Cognito JWT.
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub token_use: String,
    pub exp: u64,
    pub iat: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "custom:role")]
    pub role: Option<String>,
}

impl Claims {
    /// Resolve the role claim. A missing or unrecognized claim grants the
    /// least-privileged role.
    pub fn role(&self) -> Role {
        self.role.as_deref().map(Role::classify).unwrap_or(Role::Teacher)
    }
}

/// Validate a Cognito JWT token.
///
/// In production, you would fetch the JWKS from the Cognito user pool
/// and use the matching key. This function takes a pre-fetched public key.
pub fn validate_token(
    token: &str,
    decoding_key: &DecodingKey,
    user_pool_id: &str,
    region: &str,
) -> Result<Claims, AuthError> {
    let issuer = format!("https://cognito-idp.{region}.amazonaws.com/{user_pool_id}");

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[&issuer]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, decoding_key, &validation).map_err(|e| {
        if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature) {
            AuthError::TokenExpired
        } else {
            AuthError::Jwt(e)
        }
    })?;

    // Verify token_use is "access" or "id"
    let token_use = &token_data.claims.token_use;
    if token_use != "access" && token_use != "id" {
        return Err(AuthError::InvalidToken(format!(
            "unexpected token_use: {token_use}"
        )));
    }

    Ok(token_data.claims)
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    TokenExpired,

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("Cognito error: {0}")]
    Cognito(String),

    #[error("JWT error: {0}")]
    Jwt(jsonwebtoken::errors::Error),
}

use std::sync::Arc;

use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use aws_sdk_s3::Client as S3Client;
use jsonwebtoken::DecodingKey;

use derivapp_notify::NotifyHandle;

/// Shared application state, injected into all route handlers via Axum
/// state.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub bucket: String,
    pub cognito: CognitoClient,
    pub user_pool_id: String,
    pub region: String,
    /// RS256 public key for token verification. `None` only in the
    /// explicit dev fallback, which skips signature checks.
    pub decoding_key: Option<Arc<DecodingKey>>,
    pub notify: NotifyHandle,
}

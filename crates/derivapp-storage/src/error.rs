use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found: {key}")]
    NotFound { key: String },

    #[error("document already exists: {key}")]
    AlreadyExists { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),

    #[error("S3 DeleteObject error: {0}")]
    DeleteObject(String),

    #[error("S3 ListObjects error: {0}")]
    ListObjects(String),

    #[error("AWS config error: {0}")]
    Config(String),
}

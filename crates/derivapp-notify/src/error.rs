use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Http(String),

    #[error("webhook endpoint returned status {0}")]
    Status(u16),
}

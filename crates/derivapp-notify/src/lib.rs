//! derivapp-notify
//!
//! Outbound webhook notifications. Events go onto an in-process queue
//! that a background dispatcher drains toward the configured automation
//! endpoint. Senders never wait on delivery, and delivery failure is
//! visible only in the dispatcher's logs.

pub mod error;
pub mod webhook;

pub use webhook::{spawn_dispatcher, NotifyHandle, WebhookEvent};

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::error::NotifyError;

/// An event posted to the automation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookEvent {
    pub event: String,
    pub resource_id: String,
    pub payload: serde_json::Value,
}

impl WebhookEvent {
    pub fn referral_created(referral_id: impl ToString, payload: serde_json::Value) -> Self {
        Self {
            event: "referral.created".to_string(),
            resource_id: referral_id.to_string(),
            payload,
        }
    }

    pub fn alert_raised(referral_id: impl ToString, payload: serde_json::Value) -> Self {
        Self {
            event: "alert.raised".to_string(),
            resource_id: referral_id.to_string(),
            payload,
        }
    }
}

/// Cloneable sender half of the notification queue.
#[derive(Clone)]
pub struct NotifyHandle {
    tx: mpsc::UnboundedSender<WebhookEvent>,
}

impl NotifyHandle {
    /// Queue an event for delivery. Never blocks and never fails the
    /// caller; if the dispatcher is gone the event is dropped with a
    /// warning.
    pub fn emit(&self, event: WebhookEvent) {
        if self.tx.send(event).is_err() {
            warn!("notification channel closed, event dropped");
        }
    }
}

/// Create the notification queue and spawn its dispatcher task.
///
/// With no webhook URL configured the dispatcher still drains the queue,
/// dropping events, so senders behave identically either way.
pub fn spawn_dispatcher(webhook_url: Option<String>) -> NotifyHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run_dispatcher(rx, webhook_url));
    NotifyHandle { tx }
}

async fn run_dispatcher(
    mut rx: mpsc::UnboundedReceiver<WebhookEvent>,
    webhook_url: Option<String>,
) {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => Some(client),
        Err(e) => {
            error!(error = %e, "failed to build webhook client, outbound notifications disabled");
            None
        }
    };

    while let Some(event) = rx.recv().await {
        let (Some(client), Some(url)) = (&client, &webhook_url) else {
            debug!(event = %event.event, "webhook delivery not configured, dropping event");
            continue;
        };

        if let Err(e) = deliver(client, url, &event).await {
            warn!(event = %event.event, error = %e, "webhook delivery failed");
        }
    }
}

async fn deliver(
    client: &reqwest::Client,
    url: &str,
    event: &WebhookEvent,
) -> Result<(), NotifyError> {
    let resp = client
        .post(url)
        .json(event)
        .send()
        .await
        .map_err(|e| NotifyError::Http(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(NotifyError::Status(resp.status().as_u16()));
    }

    Ok(())
}

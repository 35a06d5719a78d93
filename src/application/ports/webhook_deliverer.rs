use async_trait::async_trait;

use crate::domain::WebhookEvent;

/// Single best-effort delivery of an event to one subscriber URL. No retry,
/// no acknowledgment tracking.
#[async_trait]
pub trait WebhookDeliverer: Send + Sync {
    async fn deliver(&self, url: &str, event: &WebhookEvent) -> Result<(), DeliveryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("subscriber responded with status {0}")]
    Rejected(u16),
}

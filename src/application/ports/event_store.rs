use async_trait::async_trait;

use crate::domain::WebhookEvent;

use super::RepositoryError;

/// Bounded history of emitted events, newest first.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn record(&self, event: WebhookEvent) -> Result<(), RepositoryError>;

    /// Snapshot of the retained events, newest first.
    async fn list(&self) -> Result<Vec<WebhookEvent>, RepositoryError>;
}

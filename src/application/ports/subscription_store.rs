use async_trait::async_trait;

use super::RepositoryError;

/// Set of webhook subscriber URLs.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Adds a URL if absent (idempotent) and returns the current full list
    /// in subscription order.
    async fn add(&self, url: &str) -> Result<Vec<String>, RepositoryError>;

    async fn list(&self) -> Result<Vec<String>, RepositoryError>;
}

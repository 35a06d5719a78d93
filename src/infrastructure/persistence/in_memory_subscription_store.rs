use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, SubscriptionStore};

/// Subscriber URLs in subscription order. Re-adding a URL is a no-op.
pub struct InMemorySubscriptionStore {
    urls: RwLock<Vec<String>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self {
            urls: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemorySubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn add(&self, url: &str) -> Result<Vec<String>, RepositoryError> {
        let mut urls = self.urls.write().await;
        if !urls.iter().any(|u| u == url) {
            urls.push(url.to_string());
        }
        Ok(urls.clone())
    }

    async fn list(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.urls.read().await.clone())
    }
}

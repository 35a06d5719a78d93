use std::collections::VecDeque;

use tokio::sync::RwLock;

use crate::application::ports::{EventStore, RepositoryError};
use crate::domain::WebhookEvent;

/// Maximum number of events retained, oldest evicted first.
pub const EVENT_HISTORY_LIMIT: usize = 50;

/// Newest-first ring of the most recently emitted events.
pub struct InMemoryEventLog {
    events: RwLock<VecDeque<WebhookEvent>>,
    capacity: usize,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_HISTORY_LIMIT)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }
}

impl Default for InMemoryEventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EventStore for InMemoryEventLog {
    async fn record(&self, event: WebhookEvent) -> Result<(), RepositoryError> {
        let mut events = self.events.write().await;
        events.push_front(event);
        events.truncate(self.capacity);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<WebhookEvent>, RepositoryError> {
        Ok(self.events.read().await.iter().cloned().collect())
    }
}

use std::sync::Arc;

use crate::application::ports::{EventStore, SubscriptionStore, WebhookDeliverer};
use crate::domain::WebhookEvent;

/// Terminal transition of an asynchronous job; `data` carries the job id and
/// outcome.
pub const EVENT_JOB_COMPLETED: &str = "completed";

/// Synchronous extraction finished; `data` carries a vendor/amount summary.
pub const EVENT_INVOICE_EXTRACTED: &str = "extracted";

/// Fans an event out to the event log and every subscriber.
///
/// The log append completes before `emit` returns; deliveries run as
/// detached tasks whose outcomes are only logged. A subscriber failure never
/// reaches the emitting caller and never affects other subscribers.
pub struct NotificationService {
    event_store: Arc<dyn EventStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
    deliverer: Arc<dyn WebhookDeliverer>,
}

impl NotificationService {
    pub fn new(
        event_store: Arc<dyn EventStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        deliverer: Arc<dyn WebhookDeliverer>,
    ) -> Self {
        Self {
            event_store,
            subscriptions,
            deliverer,
        }
    }

    pub async fn emit(&self, event: &str, data: serde_json::Value) {
        let event = WebhookEvent::new(event, data);

        if let Err(e) = self.event_store.record(event.clone()).await {
            tracing::warn!(error = %e, event = %event.event, "Failed to record event");
        }

        let subscribers = match self.subscriptions.list().await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list webhook subscribers");
                return;
            }
        };

        for url in subscribers {
            let deliverer = Arc::clone(&self.deliverer);
            let event = event.clone();
            tokio::spawn(async move {
                match deliverer.deliver(&url, &event).await {
                    Ok(()) => {
                        tracing::debug!(url = %url, event = %event.event, "Webhook delivered");
                    }
                    Err(e) => {
                        tracing::warn!(
                            url = %url,
                            event = %event.event,
                            error = %e,
                            "Webhook delivery failed"
                        );
                    }
                }
            });
        }
    }
}

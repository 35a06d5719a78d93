use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use factura::application::ports::{
    DeliveryError, EventStore, SubscriptionStore, WebhookDeliverer,
};
use factura::application::services::NotificationService;
use factura::domain::WebhookEvent;
use factura::infrastructure::persistence::{InMemoryEventLog, InMemorySubscriptionStore};

/// Captures every delivery; fails those aimed at `failing_url`.
struct RecordingDeliverer {
    sender: mpsc::UnboundedSender<(String, String)>,
    failing_url: Option<String>,
}

#[async_trait::async_trait]
impl WebhookDeliverer for RecordingDeliverer {
    async fn deliver(&self, url: &str, event: &WebhookEvent) -> Result<(), DeliveryError> {
        if self.failing_url.as_deref() == Some(url) {
            return Err(DeliveryError::RequestFailed("connection refused".to_string()));
        }
        let _ = self.sender.send((url.to_string(), event.event.clone()));
        Ok(())
    }
}

fn notification_fixture(
    failing_url: Option<&str>,
) -> (
    NotificationService,
    Arc<InMemoryEventLog>,
    Arc<InMemorySubscriptionStore>,
    mpsc::UnboundedReceiver<(String, String)>,
) {
    let event_log = Arc::new(InMemoryEventLog::new());
    let subscriptions = Arc::new(InMemorySubscriptionStore::new());
    let (sender, receiver) = mpsc::unbounded_channel();
    let deliverer = Arc::new(RecordingDeliverer {
        sender,
        failing_url: failing_url.map(String::from),
    });

    let service = NotificationService::new(
        Arc::clone(&event_log) as Arc<dyn EventStore>,
        Arc::clone(&subscriptions) as Arc<dyn SubscriptionStore>,
        deliverer,
    );

    (service, event_log, subscriptions, receiver)
}

#[tokio::test]
async fn given_no_subscribers_when_emitted_then_event_is_logged_before_return() {
    let (service, event_log, _subscriptions, _receiver) = notification_fixture(None);

    service
        .emit("completed", serde_json::json!({ "jobId": "j1" }))
        .await;

    let events = event_log.list().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "completed");
    assert_eq!(events[0].data["jobId"], "j1");
}

#[tokio::test]
async fn given_two_subscribers_when_emitted_then_both_receive_the_event() {
    let (service, _event_log, subscriptions, mut receiver) = notification_fixture(None);
    subscriptions.add("http://a/hook").await.unwrap();
    subscriptions.add("http://b/hook").await.unwrap();

    service.emit("completed", serde_json::json!({})).await;

    let mut delivered = Vec::new();
    for _ in 0..2 {
        let (url, event) = timeout(Duration::from_secs(1), receiver.recv())
            .await
            .expect("delivery timed out")
            .unwrap();
        assert_eq!(event, "completed");
        delivered.push(url);
    }
    delivered.sort();
    assert_eq!(delivered, vec!["http://a/hook", "http://b/hook"]);
}

#[tokio::test]
async fn given_failing_subscriber_when_emitted_then_others_still_receive() {
    let (service, event_log, subscriptions, mut receiver) =
        notification_fixture(Some("http://dead/hook"));
    subscriptions.add("http://dead/hook").await.unwrap();
    subscriptions.add("http://alive/hook").await.unwrap();

    service.emit("completed", serde_json::json!({})).await;

    let (url, _) = timeout(Duration::from_secs(1), receiver.recv())
        .await
        .expect("delivery timed out")
        .unwrap();
    assert_eq!(url, "http://alive/hook");

    // the failed delivery left no mark on the log
    assert_eq!(event_log.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_repeated_emissions_when_listed_then_history_is_newest_first() {
    let (service, event_log, _subscriptions, _receiver) = notification_fixture(None);

    service.emit("extracted", serde_json::json!({ "seq": 1 })).await;
    service.emit("completed", serde_json::json!({ "seq": 2 })).await;

    let events = event_log.list().await.unwrap();
    assert_eq!(events[0].data["seq"], 2);
    assert_eq!(events[1].data["seq"], 1);
}

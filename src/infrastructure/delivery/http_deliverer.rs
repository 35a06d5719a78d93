use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{DeliveryError, WebhookDeliverer};
use crate::domain::WebhookEvent;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers events as JSON POSTs. One attempt per event and subscriber; a
/// slow or unreachable subscriber costs at most the request timeout.
pub struct HttpWebhookDeliverer {
    client: Client,
}

impl HttpWebhookDeliverer {
    pub fn new() -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookDeliverer for HttpWebhookDeliverer {
    async fn deliver(&self, url: &str, event: &WebhookEvent) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(url)
            .json(event)
            .send()
            .await
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DeliveryError::Rejected(response.status().as_u16()));
        }

        Ok(())
    }
}

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{EventStore, InvoiceExtractor, JobRepository, SubscriptionStore};
use crate::application::services::{ExtractionMessage, NotificationService};
use crate::infrastructure::auth::TokenService;
use crate::presentation::config::Settings;

pub struct AppState<E>
where
    E: InvoiceExtractor,
{
    pub extractor: Arc<E>,
    pub job_repository: Arc<dyn JobRepository>,
    pub subscription_store: Arc<dyn SubscriptionStore>,
    pub event_store: Arc<dyn EventStore>,
    pub notification_service: Arc<NotificationService>,
    pub extraction_sender: mpsc::Sender<ExtractionMessage>,
    pub token_service: TokenService,
    pub settings: Settings,
}

impl<E> Clone for AppState<E>
where
    E: InvoiceExtractor,
{
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            job_repository: Arc::clone(&self.job_repository),
            subscription_store: Arc::clone(&self.subscription_store),
            event_store: Arc::clone(&self.event_store),
            notification_service: Arc::clone(&self.notification_service),
            extraction_sender: self.extraction_sender.clone(),
            token_service: self.token_service.clone(),
            settings: self.settings.clone(),
        }
    }
}

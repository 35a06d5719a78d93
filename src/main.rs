use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use factura::application::ports::{
    EventStore, JobRepository, SubscriptionStore, WebhookDeliverer,
};
use factura::application::services::{ExtractionWorker, NotificationService};
use factura::infrastructure::auth::TokenService;
use factura::infrastructure::delivery::HttpWebhookDeliverer;
use factura::infrastructure::extraction::GeminiExtractor;
use factura::infrastructure::observability::{TracingConfig, init_tracing};
use factura::infrastructure::persistence::{
    InMemoryEventLog, InMemoryJobRepository, InMemorySubscriptionStore,
};
use factura::presentation::{AppState, Settings, create_router};

const EXTRACTION_QUEUE_DEPTH: usize = 64;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    let extractor = Arc::new(GeminiExtractor::new(
        settings.gemini.api_key.clone(),
        settings.gemini.model.clone(),
    ));

    let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
    let subscription_store: Arc<dyn SubscriptionStore> = Arc::new(InMemorySubscriptionStore::new());
    let event_store: Arc<dyn EventStore> = Arc::new(InMemoryEventLog::new());
    let deliverer: Arc<dyn WebhookDeliverer> = Arc::new(HttpWebhookDeliverer::new()?);

    let notification_service = Arc::new(NotificationService::new(
        Arc::clone(&event_store),
        Arc::clone(&subscription_store),
        deliverer,
    ));

    let (extraction_sender, extraction_receiver) = mpsc::channel(EXTRACTION_QUEUE_DEPTH);
    let worker = ExtractionWorker::new(
        extraction_receiver,
        Arc::clone(&extractor),
        Arc::clone(&job_repository),
        Arc::clone(&notification_service),
    );
    tokio::spawn(worker.run());

    let token_service = TokenService::new(&settings.auth.jwt_secret)
        .with_ttl(chrono::Duration::hours(settings.auth.token_ttl_hours));

    let host: std::net::IpAddr = settings.server.host.parse()?;
    let addr = SocketAddr::from((host, settings.server.port));

    let state = AppState {
        extractor,
        job_repository,
        subscription_store,
        event_store,
        notification_service,
        extraction_sender,
        token_service,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

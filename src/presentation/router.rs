use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::InvoiceExtractor;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    extract_invoice_handler, health_handler, inbound_webhook_handler, job_status_handler,
    login_handler, queue_invoice_handler, subscribe_webhook_handler, webhook_events_handler,
};
use crate::presentation::middleware::bearer_auth_middleware;
use crate::presentation::state::AppState;

pub fn create_router<E>(state: AppState<E>) -> Router
where
    E: InvoiceExtractor + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let protected = Router::new()
        .route("/api/extract-invoice", post(extract_invoice_handler::<E>))
        .route("/api/queue-invoice", post(queue_invoice_handler::<E>))
        .route("/api/job-status/{job_id}", get(job_status_handler::<E>))
        .route(
            "/api/webhooks/subscribe",
            post(subscribe_webhook_handler::<E>),
        )
        .route("/api/webhooks/events", get(webhook_events_handler::<E>))
        .route_layer(middleware::from_fn_with_state(
            state.token_service.clone(),
            bearer_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/login", post(login_handler::<E>))
        .route("/api/webhooks", post(inbound_webhook_handler))
        .merge(protected)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::InvoiceExtractor;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SubscribeRequest {
    pub url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub message: String,
    pub active_subscriptions: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, payload))]
pub async fn subscribe_webhook_handler<E>(
    State(state): State<AppState<E>>,
    Json(payload): Json<SubscribeRequest>,
) -> impl IntoResponse
where
    E: InvoiceExtractor + 'static,
{
    let url = match payload.url {
        Some(url) if !url.is_empty() => url,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "A webhook url is required".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.subscription_store.add(&url).await {
        Ok(active_subscriptions) => {
            tracing::info!(url = %url, count = active_subscriptions.len(), "Webhook subscribed");
            (
                StatusCode::OK,
                Json(SubscribeResponse {
                    message: "Webhook subscribed".to_string(),
                    active_subscriptions,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store subscription");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to subscribe: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn webhook_events_handler<E>(State(state): State<AppState<E>>) -> impl IntoResponse
where
    E: InvoiceExtractor + 'static,
{
    match state.event_store.list().await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list events");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list events: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[derive(Serialize)]
pub struct InboundWebhookResponse {
    pub status: String,
}

/// Generic sink so the service can be pointed at itself during manual
/// testing; the payload is only logged.
pub async fn inbound_webhook_handler(Json(payload): Json<serde_json::Value>) -> impl IntoResponse {
    tracing::info!(payload = %payload, "Inbound webhook received");
    (
        StatusCode::OK,
        Json(InboundWebhookResponse {
            status: "received".to_string(),
        }),
    )
}

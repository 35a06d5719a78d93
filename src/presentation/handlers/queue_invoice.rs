use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::InvoiceExtractor;
use crate::application::services::ExtractionMessage;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct QueueInvoiceRequest {
    pub image: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueInvoiceResponse {
    pub message: String,
    pub job_id: String,
    pub status_url: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Enqueues an extraction job and returns immediately; the caller polls the
/// status URL or subscribes to webhooks for the outcome.
#[tracing::instrument(skip(state, payload))]
pub async fn queue_invoice_handler<E>(
    State(state): State<AppState<E>>,
    Json(payload): Json<QueueInvoiceRequest>,
) -> impl IntoResponse
where
    E: InvoiceExtractor + 'static,
{
    let image = match payload.image {
        Some(image) if !image.is_empty() => image,
        _ => {
            tracing::warn!("Queue request with no image");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "A base64 image is required".to_string(),
                }),
            )
                .into_response();
        }
    };

    let job = match state.job_repository.create().await {
        Ok(job) => job,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create job record");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to create job: {}", e),
                }),
            )
                .into_response();
        }
    };

    let msg = ExtractionMessage {
        job_id: job.id,
        image_base64: image,
    };

    if let Err(e) = state.extraction_sender.send(msg).await {
        tracing::error!(error = %e, "Failed to enqueue extraction job");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Extraction queue full or worker unavailable".to_string(),
            }),
        )
            .into_response();
    }

    let job_id = job.id.as_uuid().to_string();
    tracing::info!(job_id = %job_id, "Extraction job enqueued");

    (
        StatusCode::OK,
        Json(QueueInvoiceResponse {
            message: "Invoice queued for processing".to_string(),
            status_url: format!("/api/job-status/{}", job_id),
            job_id,
        }),
    )
        .into_response()
}

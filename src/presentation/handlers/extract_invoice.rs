use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::application::ports::InvoiceExtractor;
use crate::application::services::EVENT_INVOICE_EXTRACTED;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ExtractInvoiceRequest {
    pub image: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Synchronous path: the response carries the extraction result directly.
#[tracing::instrument(skip(state, payload))]
pub async fn extract_invoice_handler<E>(
    State(state): State<AppState<E>>,
    Json(payload): Json<ExtractInvoiceRequest>,
) -> impl IntoResponse
where
    E: InvoiceExtractor + 'static,
{
    let image = match payload.image {
        Some(image) if !image.is_empty() => image,
        _ => {
            tracing::warn!("Extract request with no image");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "A base64 image is required".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.extractor.extract(&image).await {
        Ok(data) => {
            tracing::info!(vendor = %data.vendor_name, "Invoice extracted");
            state
                .notification_service
                .emit(
                    EVENT_INVOICE_EXTRACTED,
                    json!({
                        "vendorName": data.vendor_name,
                        "totalAmount": data.total_amount,
                    }),
                )
                .await;
            (StatusCode::OK, Json(data)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Extraction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

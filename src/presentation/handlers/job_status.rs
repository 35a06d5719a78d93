use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::InvoiceExtractor;
use crate::domain::{InvoiceData, Job, JobId};
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InvoiceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl JobStatusResponse {
    fn from_job(job: Job) -> Self {
        Self {
            id: job.id.as_uuid().to_string(),
            status: job.status.as_str().to_string(),
            result: job.result,
            error: job.error_message,
            created_at: job.created_at.to_rfc3339(),
            updated_at: job.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Job ids are opaque to clients, so anything that does not resolve —
/// including ids that do not parse — is a 404.
#[tracing::instrument(skip(state))]
pub async fn job_status_handler<E>(
    State(state): State<AppState<E>>,
    Path(job_id): Path<String>,
) -> impl IntoResponse
where
    E: InvoiceExtractor + 'static,
{
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Job not found: {}", job_id),
            }),
        )
            .into_response()
    };

    let Ok(uuid) = Uuid::parse_str(&job_id) else {
        return not_found();
    };

    match state.job_repository.get_by_id(JobId::from_uuid(uuid)).await {
        Ok(Some(job)) => (StatusCode::OK, Json(JobStatusResponse::from_job(job))).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch job: {}", e),
                }),
            )
                .into_response()
        }
    }
}

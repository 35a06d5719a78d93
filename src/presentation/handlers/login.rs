use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::InvoiceExtractor;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The only path that mints tokens. Credentials are the single shared
/// account from configuration, compared verbatim.
#[tracing::instrument(skip(state, payload))]
pub async fn login_handler<E>(
    State(state): State<AppState<E>>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse
where
    E: InvoiceExtractor + 'static,
{
    let auth = &state.settings.auth;
    if payload.username != auth.username || payload.password != auth.password {
        tracing::warn!(username = %payload.username, "Login rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid credentials".to_string(),
            }),
        )
            .into_response();
    }

    match state.token_service.issue(&payload.username) {
        Ok(token) => {
            tracing::info!(username = %payload.username, "Login succeeded");
            (
                StatusCode::OK,
                Json(LoginResponse {
                    access_token: token,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to issue token");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to issue token".to_string(),
                }),
            )
                .into_response()
        }
    }
}

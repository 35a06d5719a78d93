use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::infrastructure::auth::TokenService;

/// Principal decoded from a valid bearer token, available to downstream
/// handlers via request extensions.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub String);

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Rejects the request with 401 before any handler runs unless it carries a
/// valid, unexpired bearer token.
pub async fn bearer_auth_middleware(
    State(token_service): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header) = header else {
        return unauthorized("Missing Authorization header");
    };

    let Some(token) = header.strip_prefix("Bearer ") else {
        return unauthorized("Expected a bearer token");
    };

    match token_service.verify(token) {
        Ok(claims) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser(claims.sub));
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            unauthorized("Invalid or expired token")
        }
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

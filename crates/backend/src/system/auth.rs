use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use contracts::shared::response::ApiResponse;

use crate::shared::config;

/// Static-token check for destructive routes. The Authorization header is
/// compared verbatim against the configured token; requests are rejected
/// before the service layer is reached. An unset token rejects everything.
pub async fn require_delete_token(req: Request<Body>, next: Next) -> Response {
    let expected = match config::get().auth.delete_token.as_deref() {
        Some(token) if !token.is_empty() => token,
        _ => {
            tracing::warn!("Delete token is not configured, rejecting request");
            return reject("Delete authorization is not configured");
        }
    };

    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match provided {
        None => {
            tracing::warn!("Authorization header is missing");
            reject("Authorization header is required")
        }
        Some(value) if value != expected => {
            tracing::warn!("Invalid authorization token");
            reject("Invalid authorization token")
        }
        Some(_) => next.run(req).await,
    }
}

fn reject(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}

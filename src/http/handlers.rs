//! Request handlers.
//!
//! The HTTP layer owns the outcome→status mapping; the orchestrator only
//! knows the error taxonomy. Body decoding stays inside the orchestrator so
//! a malformed payload still lands in the outcome accounting.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, warn};

use crate::http::server::AppState;
use crate::orchestrator::PaymentError;
use crate::telemetry::extract_context;

/// `POST /process_payment`.
pub async fn process_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let cx = extract_context(&headers);

    match state.orchestrator.process(&cx, &body).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "Payment successful" })),
        )
            .into_response(),
        Err(PaymentError::InvalidRequest(message)) => {
            debug!(error = %message, "rejected malformed payment request");
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
        Err(err @ PaymentError::ProductFetch(_)) => {
            warn!(error = ?err, "product lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Could not fetch product" })),
            )
                .into_response()
        }
        Err(err @ PaymentError::AuthorizationFailed(_)) => {
            warn!(error = ?err, "authorization call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Could not authorize payment" })),
            )
                .into_response()
        }
        Err(PaymentError::Denied) => {
            debug!("payment denied by authorization service");
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "status": "Payment not authorized" })),
            )
                .into_response()
        }
    }
}

/// `GET /health`.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Message;
use service::{auth::errors::AuthError, errors::ServiceError};
use thiserror::Error;
use tracing::error;

/// Everything a handler or the token gate can fail with.
///
/// Only the two gate failures have dedicated statuses; store and payload
/// failures (malformed ids included) all answer 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized access")]
    Unauthenticated,
    #[error("Forbidden access")]
    Forbidden,
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredential => ApiError::Unauthenticated,
            AuthError::InvalidToken(_) => ApiError::Forbidden,
            AuthError::Signing(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, Json(Message::new("unauthorized access"))).into_response(),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, Json(Message::new("Forbidden access"))).into_response(),
            other => {
                let msg = other.to_string();
                let mut resp = (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": msg }))).into_response();
                resp.extensions_mut().insert(FailureDetail(msg));
                resp
            }
        }
    }
}

/// Error text of a failed request, carried on the response for `log_failures`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail(pub String);

/// Log every response that carries a `FailureDetail`, with method and path.
pub async fn log_failures(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let resp = next.run(req).await;
    if let Some(FailureDetail(msg)) = resp.extensions().get::<FailureDetail>() {
        error!(%method, %path, status = resp.status().as_u16(), error = %msg, "request failed");
    }
    resp
}

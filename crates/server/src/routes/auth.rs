use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::Value;
use service::{
    auth::{
        domain::{IssuedToken, VerifiedClaims},
        TokenService,
    },
    errors::ServiceError,
    DocumentStore, ListingService, ReviewService,
};

use crate::{errors::ApiError, extract::JsonBody};

/// Shared handler state. The store handle inside the services is created once
/// at startup and cloned into every request.
#[derive(Clone)]
pub struct ServerState {
    pub listings: ListingService,
    pub reviews: ReviewService,
    pub tokens: Arc<TokenService>,
}

impl ServerState {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: TokenService) -> Self {
        Self {
            listings: ListingService::new(Arc::clone(&store)),
            reviews: ReviewService::new(store),
            tokens: Arc::new(tokens),
        }
    }
}

/// `POST /jwt`: sign the request body as claims, valid for one day.
pub async fn issue_token(
    State(state): State<ServerState>,
    JsonBody(body): JsonBody,
) -> Result<Json<IssuedToken>, ApiError> {
    let Value::Object(claims) = body else {
        return Err(ServiceError::Payload("claims must be a JSON object".into()).into());
    };
    let token = state.tokens.issue(claims)?;
    Ok(Json(IssuedToken { token }))
}

/// Bearer gate: 401 without an `Authorization` header, 403 when the token does
/// not verify. Verified claims are stored in the request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authz = req.headers().get(header::AUTHORIZATION).map(|v| v.as_bytes());
    let claims = state.tokens.authorize(authz).map_err(|e| {
        tracing::warn!(path = %req.uri().path(), code = e.code(), err = %e, "token gate rejected request");
        ApiError::from(e)
    })?;
    req.extensions_mut().insert(VerifiedClaims(claims));
    Ok(next.run(req).await)
}

//! Request body extraction with `express.json()` semantics: a request that
//! is not `application/json`, or whose body is empty, reads as `{}`.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(&req) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }
        let bytes = Bytes::from_request(req, state).await.map_err(IntoResponse::into_response)?;
        if bytes.is_empty() {
            return Ok(JsonBody(Value::Object(Map::new())));
        }
        let Json(value) = Json::<Value>::from_bytes(&bytes).map_err(IntoResponse::into_response)?;
        Ok(JsonBody(value))
    }
}

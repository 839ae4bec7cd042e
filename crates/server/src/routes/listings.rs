use axum::{
    extract::{Path, Query, State},
    Json,
};
use models::{ack::InsertAck, render};
use serde::Deserialize;
use serde_json::Value;

use crate::{errors::ApiError, extract::JsonBody, routes::ServerState};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Only presence matters; an empty value counts as absent.
    pub limit: Option<String>,
}

impl ListQuery {
    fn preview(&self) -> bool {
        self.limit.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// `GET /services[?limit]`
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<Value>>, ApiError> {
    let docs = state.listings.list(q.preview()).await?;
    Ok(Json(docs.into_iter().map(render::document_to_json).collect()))
}

/// `GET /services/:id`; `null` when nothing matches.
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Option<Value>>, ApiError> {
    let doc = state.listings.get(&id).await?;
    Ok(Json(doc.map(render::document_to_json)))
}

/// `POST /services`
pub async fn create(State(state): State<ServerState>, JsonBody(payload): JsonBody) -> Result<Json<InsertAck>, ApiError> {
    Ok(Json(state.listings.create(payload).await?))
}

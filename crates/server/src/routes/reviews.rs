use axum::{
    extract::{Path, Query, State},
    Json,
};
use models::{
    ack::{DeleteAck, InsertAck, UpdateAck},
    render, review,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{errors::ApiError, extract::JsonBody, routes::ServerState};

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub email: Option<String>,
}

fn to_json(docs: Vec<models::Document>) -> Json<Vec<Value>> {
    Json(docs.into_iter().map(render::document_to_json).collect())
}

/// `POST /reviews`
pub async fn create(State(state): State<ServerState>, JsonBody(payload): JsonBody) -> Result<Json<InsertAck>, ApiError> {
    Ok(Json(state.reviews.create(payload).await?))
}

/// `GET /reviews[?email=]`
pub async fn list(State(state): State<ServerState>, Query(q): Query<ReviewQuery>) -> Result<Json<Vec<Value>>, ApiError> {
    let email = q.email.as_deref().filter(|e| !e.is_empty());
    Ok(to_json(state.reviews.list(email).await?))
}

/// `GET /getReviewsByServiceId/:id`
pub async fn by_service_id(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(to_json(state.reviews.by_service_id(&id).await?))
}

/// `PATCH /reviews/:id` with `{"comment": ...}`
pub async fn update_comment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<UpdateAck>, ApiError> {
    let comment = body.get(review::COMMENT).cloned();
    Ok(Json(state.reviews.update_comment(&id, comment).await?))
}

/// `DELETE /reviews/:id`
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<DeleteAck>, ApiError> {
    Ok(Json(state.reviews.delete(&id).await?))
}

use axum::{
    middleware,
    routing::{get, patch, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::LIVENESS_TEXT;

use crate::errors;

pub mod auth;
pub mod listings;
pub mod reviews;

pub use auth::ServerState;

pub async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

/// Build the full application router.
///
/// With `protect_mutations` off every route is public. With it on, the bearer
/// gate sits in front of the insert, update and delete routes.
pub fn build_router(state: ServerState, cors: CorsLayer, protect_mutations: bool) -> Router {
    let gate_state = state.clone();
    let mutating = move |route: MethodRouter<ServerState>| {
        if protect_mutations {
            route.route_layer(middleware::from_fn_with_state(gate_state.clone(), auth::require_bearer_token))
        } else {
            route
        }
    };

    Router::new()
        .route("/", get(liveness))
        .route("/jwt", post(auth::issue_token))
        .route("/services", get(listings::list).merge(mutating(post(listings::create))))
        .route("/services/:id", get(listings::get))
        .route("/reviews", get(reviews::list).merge(mutating(post(reviews::create))))
        .route("/reviews/:id", mutating(patch(reviews::update_comment).delete(reviews::delete)))
        .route("/getReviewsByServiceId/:id", get(reviews::by_service_id))
        .with_state(state)
        .layer(middleware::from_fn(errors::log_failures))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use service::{
    auth::{domain::TokenConfig, TokenService},
    store::MongoStore,
    DocumentStore,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Build the application around an already-constructed store.
pub fn build_app(cfg: &AppConfig, store: Arc<dyn DocumentStore>) -> Router {
    let tokens = TokenService::new(TokenConfig {
        secret: cfg.auth.jwt_secret.clone(),
        ttl_secs: cfg.auth.token_ttl_secs,
    });
    if !cfg.auth.protect_mutations {
        info!("token gate not attached to any route");
    }
    let state = ServerState::new(store, tokens);
    routes::build_router(state, build_cors(), cfg.auth.protect_mutations)
}

/// Public entry: connect the store and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect(&cfg.database).await?;
    if let Err(e) = models::db::ping(&db).await {
        warn!(error = %e, "document store ping failed; requests will fail until it is reachable");
    }
    let store: Arc<dyn DocumentStore> = Arc::new(MongoStore::new(db));
    let app = build_app(&cfg, store);

    let addr = load_bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Hair cut server running on port:{}", addr.port());
    axum::serve(listener, app).await?;
    Ok(())
}

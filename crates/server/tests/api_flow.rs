use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{middleware, routing::get, Extension, Router};
use serde_json::{json, Value};
use service::{
    auth::{
        domain::{TokenConfig, VerifiedClaims},
        TokenService,
    },
    store::MemoryStore,
    DocumentStore,
};
use tower::Service;

use server::errors::FailureDetail;
use server::routes::{auth::require_bearer_token, ServerState};
use server::startup::build_app;

const SECRET: &str = "test-secret";

fn config(protect_mutations: bool) -> configs::AppConfig {
    let mut cfg = configs::AppConfig::default();
    cfg.auth.jwt_secret = SECRET.into();
    cfg.auth.protect_mutations = protect_mutations;
    cfg
}

fn build_test_app(protect_mutations: bool) -> Router {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    build_app(&config(protect_mutations), store)
}

fn json_request(method: &str, uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?)
}

fn empty_request(method: &str, uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().method(method).uri(uri).body(Body::empty())?)
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

fn inserted_id(ack: &Value) -> String {
    ack["insertedId"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn liveness_string() -> anyhow::Result<()> {
    let app = build_test_app(false);
    let resp = app.clone().call(empty_request("GET", "/")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"Hair cut server is running");
    Ok(())
}

#[tokio::test]
async fn services_limit_flag() -> anyhow::Result<()> {
    let app = build_test_app(false);
    for i in 0..5 {
        let (status, ack) = send(&app, json_request("POST", "/services", json!({ "name": format!("cut {i}"), "price": 10 + i }))?).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack["acknowledged"], true);
        assert_eq!(inserted_id(&ack).len(), 24);
    }

    let (_, limited) = send(&app, empty_request("GET", "/services?limit=anything")?).await?;
    assert_eq!(limited.as_array().map(Vec::len), Some(3));

    let (_, all) = send(&app, empty_request("GET", "/services")?).await?;
    assert_eq!(all.as_array().map(Vec::len), Some(5));
    assert_eq!(all[0]["name"], "cut 0");

    // an empty flag value counts as absent
    let (_, empty_flag) = send(&app, empty_request("GET", "/services?limit=")?).await?;
    assert_eq!(empty_flag.as_array().map(Vec::len), Some(5));
    Ok(())
}

#[tokio::test]
async fn service_by_id() -> anyhow::Result<()> {
    let app = build_test_app(false);
    let (_, ack) = send(&app, json_request("POST", "/services", json!({ "name": "Fade" }))?).await?;
    let id = inserted_id(&ack);

    let (status, found) = send(&app, empty_request("GET", &format!("/services/{id}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["_id"], id.as_str());
    assert_eq!(found["name"], "Fade");

    let (status, missing) = send(&app, empty_request("GET", "/services/64b7f0c2a1b2c3d4e5f60718")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(missing, Value::Null);

    let resp = app.clone().call(empty_request("GET", "/services/not-an-id")?).await?;
    let detail = resp.extensions().get::<FailureDetail>().cloned();
    assert!(detail.is_some_and(|FailureDetail(m)| m.contains("not-an-id")));

    let (status, err) = send(&app, empty_request("GET", "/services/not-an-id")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err["error"].as_str().unwrap_or_default().contains("invalid document id"));
    Ok(())
}

#[tokio::test]
async fn reviews_by_email() -> anyhow::Result<()> {
    let app = build_test_app(false);
    let review = json!({ "reviewer_email": "a@x.com", "service_id": "S1", "comment": "nice" });
    let (status, _) = send(&app, json_request("POST", "/reviews", review)?).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, mine) = send(&app, empty_request("GET", "/reviews?email=a@x.com")?).await?;
    let mine = mine.as_array().cloned().unwrap_or_default();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["reviewer_email"], "a@x.com");
    assert_eq!(mine[0]["service_id"], "S1");
    assert_eq!(mine[0]["comment"], "nice");

    let (_, other) = send(&app, empty_request("GET", "/reviews?email=b@y.com")?).await?;
    assert_eq!(other, json!([]));

    let (_, all) = send(&app, empty_request("GET", "/reviews")?).await?;
    assert_eq!(all.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn patch_updates_only_comment() -> anyhow::Result<()> {
    let app = build_test_app(false);
    let (_, ack) = send(
        &app,
        json_request("POST", "/reviews", json!({ "reviewer_email": "a@x.com", "service_id": "S1", "comment": "nice", "rating": 5 }))?,
    )
    .await?;
    let id = inserted_id(&ack);

    let (status, up) = send(&app, json_request("PATCH", &format!("/reviews/{id}"), json!({ "comment": "updated", "rating": 1 }))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(up, json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 1, "upsertedId": null, "upsertedCount": 0 }));

    let (_, reviews) = send(&app, empty_request("GET", "/getReviewsByServiceId/S1")?).await?;
    assert_eq!(
        reviews,
        json!([{ "_id": id, "reviewer_email": "a@x.com", "service_id": "S1", "comment": "updated", "rating": 5 }])
    );
    Ok(())
}

#[tokio::test]
async fn delete_then_refetch_is_empty() -> anyhow::Result<()> {
    let app = build_test_app(false);
    let (_, ack) = send(&app, json_request("POST", "/reviews", json!({ "service_id": "S9", "comment": "bye" }))?).await?;
    let id = inserted_id(&ack);

    let (status, del) = send(&app, empty_request("DELETE", &format!("/reviews/{id}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(del, json!({ "acknowledged": true, "deletedCount": 1 }));

    let (_, left) = send(&app, empty_request("GET", "/getReviewsByServiceId/S9")?).await?;
    assert_eq!(left, json!([]));

    let (_, again) = send(&app, empty_request("DELETE", &format!("/reviews/{id}"))?).await?;
    assert_eq!(again["deletedCount"], 0);
    Ok(())
}

#[tokio::test]
async fn issued_token_has_one_day_expiry() -> anyhow::Result<()> {
    let app = build_test_app(false);
    let (status, body) = send(&app, json_request("POST", "/jwt", json!({ "email": "a@x.com" }))?).await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap_or_default();
    assert_eq!(token.split('.').count(), 3);

    let tokens = TokenService::new(TokenConfig { secret: SECRET.into(), ttl_secs: 86_400 });
    let claims = tokens.verify(token)?;
    assert_eq!(claims.extra["email"], "a@x.com");
    assert_eq!(claims.exp - claims.iat, 86_400);
    Ok(())
}

#[tokio::test]
async fn mutations_are_public_by_default() -> anyhow::Result<()> {
    let app = build_test_app(false);
    let (status, _) = send(&app, json_request("POST", "/reviews", json!({ "service_id": "S1" }))?).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn gate_protects_mutations_when_enabled() -> anyhow::Result<()> {
    let app = build_test_app(true);
    let review = json!({ "reviewer_email": "a@x.com", "service_id": "S1", "comment": "nice" });

    // no header
    let (status, body) = send(&app, json_request("POST", "/reviews", review.clone())?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "unauthorized access" }));

    // empty header is the same as none
    let mut req = json_request("POST", "/reviews", review.clone())?;
    req.headers_mut().insert("authorization", axum::http::HeaderValue::from_static(""));
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "unauthorized access" }));

    // bad token
    let mut req = json_request("POST", "/reviews", review.clone())?;
    req.headers_mut().insert("authorization", "Bearer garbage".parse()?);
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "message": "Forbidden access" }));

    // expired token
    let tokens = TokenService::new(TokenConfig { secret: SECRET.into(), ttl_secs: 86_400 });
    let mut claims = serde_json::Map::new();
    claims.insert("email".into(), json!("a@x.com"));
    let stale = tokens.issue_at(claims, two_days_ago())?;
    let mut req = json_request("POST", "/reviews", review.clone())?;
    req.headers_mut().insert("authorization", format!("Bearer {stale}").parse()?);
    let (status, _) = send(&app, req).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // fresh token from the issuing route
    let (_, issued) = send(&app, json_request("POST", "/jwt", json!({ "email": "a@x.com" }))?).await?;
    let token = issued["token"].as_str().unwrap_or_default().to_string();
    let mut req = json_request("POST", "/reviews", review)?;
    req.headers_mut().insert("authorization", format!("Bearer {token}").parse()?);
    let (status, ack) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    let id = inserted_id(&ack);

    // reads stay public
    let (status, _) = send(&app, empty_request("GET", "/reviews")?).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, empty_request("DELETE", &format!("/reviews/{id}"))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

fn two_days_ago() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now() - chrono::Duration::days(2)
}

async fn claimed_email(Extension(VerifiedClaims(claims)): Extension<VerifiedClaims>) -> String {
    claims.extra.get("email").and_then(Value::as_str).unwrap_or_default().to_string()
}

#[tokio::test]
async fn gate_attaches_verified_claims() -> anyhow::Result<()> {
    let tokens = TokenService::new(TokenConfig { secret: SECRET.into(), ttl_secs: 86_400 });
    let mut claims = serde_json::Map::new();
    claims.insert("email".into(), json!("a@x.com"));
    let token = tokens.issue(claims)?;

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let state = ServerState::new(store, TokenService::new(TokenConfig { secret: SECRET.into(), ttl_secs: 86_400 }));
    let app: Router = Router::new()
        .route("/whoami", get(claimed_email))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer_token))
        .with_state(state);

    let mut req = empty_request("GET", "/whoami")?;
    req.headers_mut().insert("authorization", format!("Bearer {token}").parse()?);
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"a@x.com");

    let resp = app.clone().call(empty_request("GET", "/whoami")?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn bodyless_posts_read_as_empty_object() -> anyhow::Result<()> {
    let app = build_test_app(false);

    let (status, issued) = send(&app, empty_request("POST", "/jwt")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(issued["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, ack) = send(&app, empty_request("POST", "/reviews")?).await?;
    assert_eq!(status, StatusCode::OK);
    let id = inserted_id(&ack);
    let (_, all) = send(&app, empty_request("GET", "/reviews")?).await?;
    assert_eq!(all, json!([{ "_id": id }]));

    let (status, up) = send(&app, empty_request("PATCH", &format!("/reviews/{id}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(up["matchedCount"], 1);
    let (_, all) = send(&app, empty_request("GET", "/reviews")?).await?;
    assert_eq!(all, json!([{ "_id": id, "comment": null }]));

    let (status, _) = send(&app, json_request("POST", "/jwt", json!(["not", "claims"]))?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

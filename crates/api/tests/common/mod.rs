#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use muzer_api::auth::jwt::{generate_access_token, JwtConfig};
use muzer_api::config::ServerConfig;
use muzer_api::router::build_app_router;
use muzer_api::state::AppState;
use muzer_core::metadata::{MetadataResolver, YouTubeUrlResolver};
use muzer_core::types::DbId;
use muzer_db::models::user::CreateUser;
use muzer_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        resolver_timeout_secs: 5,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over `pool` with the offline YouTube
/// resolver, using the same middleware stack as production.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(YouTubeUrlResolver), test_config())
}

/// Like [`build_test_app`] with a custom resolver and config.
pub fn build_test_app_with(
    pool: PgPool,
    resolver: Arc<dyn MetadataResolver>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        resolver,
    };
    build_app_router(state, &config)
}

/// Create a user and return its id plus a valid Bearer token for it.
pub async fn signed_in_user(pool: &PgPool, email: &str) -> (DbId, String) {
    let input = CreateUser {
        email: email.to_string(),
        provider: "google".to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user.id, token_for(&user.email))
}

/// A valid Bearer token for `email`, whether or not a user row exists yet.
pub fn token_for(email: &str) -> String {
    let subject = format!("google-oauth2|{email}");
    generate_access_token(&subject, email, &test_config().jwt)
        .expect("token generation should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

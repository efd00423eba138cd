#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use countdown_db::{MemorySettingsStore, SettingsStore, StoreError};
use http_body_util::BodyExt;
use tower::ServiceExt;

use countdown_api::auth::session_token::{issue_session_token, SessionConfig};
use countdown_api::config::ServerConfig;
use countdown_api::router::build_app_router;
use countdown_api::state::AppState;

pub const ADMIN_ORIGIN: &str = "https://admin.shopify.com";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![ADMIN_ORIGIN.to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        proxy_cache_max_age_secs: 60,
        database_url: None,
        session: SessionConfig {
            api_key: "test-api-key".to_string(),
            api_secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        },
    }
}

/// Build the full application router over the given store.
pub fn build_test_app(store: Arc<dyn SettingsStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

pub fn build_test_app_with_config(store: Arc<dyn SettingsStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Router over a fresh in-memory store, returning the store for seeding.
pub fn memory_app() -> (Router, Arc<MemorySettingsStore>) {
    let store = Arc::new(MemorySettingsStore::new());
    (build_test_app(store.clone()), store)
}

/// A valid admin session token for `shop`.
pub fn session_token(shop: &str) -> String {
    issue_session_token(shop, &test_config().session, 300).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_authed(app: Router, uri: &str, shop: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", session_token(shop)))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_form_authed(app: Router, uri: &str, shop: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", session_token(shop)))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// A store whose every operation fails, for exercising 500 paths.
pub struct FailingStore;

#[async_trait]
impl SettingsStore for FailingStore {
    async fn get(&self, _shop: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("connection refused to secret-db:5432".into()))
    }

    async fn upsert(&self, _shop: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused to secret-db:5432".into()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

/// A store that panics on read, for exercising panic recovery.
pub struct PanickingStore;

#[async_trait]
impl SettingsStore for PanickingStore {
    async fn get(&self, _shop: &str) -> Result<Option<String>, StoreError> {
        panic!("store exploded");
    }

    async fn upsert(&self, _shop: &str, _value: &str) -> Result<(), StoreError> {
        panic!("store exploded");
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A store whose reads take far longer than any test timeout.
pub struct SlowStore;

#[async_trait]
impl SettingsStore for SlowStore {
    async fn get(&self, _shop: &str) -> Result<Option<String>, StoreError> {
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        Ok(None)
    }

    async fn upsert(&self, _shop: &str, _value: &str) -> Result<(), StoreError> {
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

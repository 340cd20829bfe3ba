#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use products_api::{config::AppConfig, db, AppState};

/// Helper harness for driving the application router against a fresh
/// in-memory SQLite database.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "http://localhost:5173".to_string(),
            "127.0.0.1".to_string(),
            14_000,
        );
        // A single pooled connection keeps the in-memory database alive and
        // shared across requests.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::connect(&cfg).await.expect("failed to open test database");
        db::ensure_schema(&pool)
            .await
            .expect("failed to create test schema");

        let state = AppState {
            db: Arc::new(pool),
            config: cfg,
        };
        let router = products_api::app_router().with_state(state);

        Self { router }
    }

    /// Send a request and return the raw response, for header assertions.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .expect("failed to build request"),
            None => builder
                .body(Body::empty())
                .expect("failed to build request"),
        };

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    /// Send a request and decode the JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.send(method, uri, body).await;
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not JSON")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a product through the API and return its assigned id.
    pub async fn create_product(&self, name: &str, price: f64) -> i64 {
        let (status, body) = self
            .post("/api/products", json!({"name": name, "price": price}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "fixture creation failed: {body}");
        body["data"]["id"].as_i64().expect("created product has no id")
    }
}

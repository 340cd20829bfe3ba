//! Products API Library
//!
//! REST service exposing CRUD operations over a product catalog, backed by a
//! relational store through sea-orm.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod validation;

use axum::{response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
}

/// Success-response wrapper: `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Full application router, without middleware layers so tests can mount it
/// directly.
pub fn app_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(api_index))
        .nest("/products", handlers::products::product_routes())
}

async fn api_index() -> Json<Value> {
    Json(json!({ "msg": "From API" }))
}

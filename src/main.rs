use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use http::HeaderValue;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use products_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    let pool = api::db::connect(&cfg).await?;
    if cfg.auto_migrate {
        api::db::ensure_schema(&pool).await.map_err(|e| {
            error!("Failed creating schema: {}", e);
            e
        })?;
    }

    // Single-origin CORS policy: only the configured frontend may call the API
    // cross-origin.
    let origin = cfg
        .frontend_url
        .parse::<HeaderValue>()
        .context("frontend_url is not a valid origin")?;
    let cors_layer = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = api::AppState {
        db: Arc::new(pool),
        config: cfg.clone(),
    };

    let app = api::app_router()
        // Per-request logging, the morgan equivalent in this stack
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .context("invalid host/port configuration")?;
    info!("products-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use validator::{Validate, ValidationErrors};

const DEFAULT_ENV: &str = "development";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PORT: u16 = 4000;
const CONFIG_DIR: &str = "config";

/// Application configuration with validation.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Database connection URL
    #[validate(length(min = 1))]
    pub database_url: String,

    /// The single origin allowed by the CORS policy
    #[validate(url)]
    pub frontend_url: String,

    /// Server host address
    pub host: String,

    /// Server port (1024-65535)
    #[validate(range(min = 1024, max = 65535))]
    pub port: u16,

    /// Runtime environment name ("development", "production", ...)
    pub environment: String,

    /// Log level filter (trace|debug|info|warn|error)
    pub log_level: Option<String>,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub log_json: bool,

    /// Create the schema on startup when missing
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,

    /// Database pool bounds
    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub db_min_connections: u32,
}

fn default_auto_migrate() -> bool {
    true
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl AppConfig {
    /// Minimal constructor, used by the test harness.
    pub fn new(database_url: String, frontend_url: String, host: String, port: u16) -> Self {
        Self {
            database_url,
            frontend_url,
            host,
            port,
            environment: "test".to_string(),
            log_level: None,
            log_json: false,
            auto_migrate: default_auto_migrate(),
            db_max_connections: default_max_connections(),
            db_min_connections: default_min_connections(),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("configuration loading error: {0}")]
    Load(#[from] ConfigError),
    #[error("configuration validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Loads configuration from defaults, optional `config/` profiles and
/// `APP__*` environment overrides. The bare `DATABASE_URL` and `FRONTEND_URL`
/// variables are honored too.
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let mut builder = Config::builder()
        .set_default("database_url", "sqlite://products.db?mode=rwc")?
        .set_default("frontend_url", "http://localhost:5173")?
        .set_default("host", "0.0.0.0")?
        .set_default("port", i64::from(DEFAULT_PORT))?
        .set_default("environment", DEFAULT_ENV)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false));

    if let Ok(url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database_url", url)?;
    }
    if let Ok(origin) = env::var("FRONTEND_URL") {
        builder = builder.set_override("frontend_url", origin)?;
    }

    let config = builder
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    app_config.validate()?;

    Ok(app_config)
}

/// Installs the global tracing subscriber. `RUST_LOG` wins over the
/// configured level when set.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::fmt;

    let default_directive = format!("products_api={},tower_http=info", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt().with_env_filter(filter_directive).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter_directive).try_init();
    }
}

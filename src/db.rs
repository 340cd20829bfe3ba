use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::entities::product;

/// Type alias for a database connection pool
pub type DbPool = DatabaseConnection;

/// Establishes a connection pool to the database.
///
/// Pool bounds come from the application config; the remaining options are
/// sensible fixed timeouts.
pub async fn connect(cfg: &AppConfig) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(cfg.database_url.clone());

    opt.max_connections(cfg.db_max_connections)
        .min_connections(cfg.db_min_connections)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    debug!(
        "Connecting to database with max_connections={}",
        cfg.db_max_connections
    );

    let pool = Database::connect(opt).await?;
    info!("Database connection established");
    Ok(pool)
}

/// Creates the `products` table from the entity definition when it does not
/// exist yet. Stands in for a migration runner in this single-table service.
pub async fn ensure_schema(db: &DbPool) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statement = schema.create_table_from_entity(product::Entity);
    statement.if_not_exists();

    db.execute(builder.build(&statement)).await?;
    Ok(())
}

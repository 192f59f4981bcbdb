//! Database connection helpers.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;

/// Connect using the configured URL and pool settings.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());

    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(false);

    Database::connect(options).await
}

/// In-memory SQLite connection, used by the test harness.
///
/// Pinned to a single pooled connection: every pooled connection to
/// `sqlite::memory:` would otherwise open its own empty database.
pub async fn memory() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());

    options.max_connections(1).sqlx_logging(false);

    Database::connect(options).await
}

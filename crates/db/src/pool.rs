//! Connection pool construction from `DB_*` settings.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

use bookshelf_kernel::settings::{DatabaseSettings, PoolSettings};

use crate::DbError;

/// Translate settings into typed driver options.
///
/// Fails when the port is not a number or the SSL mode is not one libpq
/// understands.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions, DbError> {
    let port: u16 = settings.port.trim().parse().map_err(|_| {
        DbError::config(format!("DB_PORT '{}' is not a valid port", settings.port))
    })?;

    let ssl_mode: PgSslMode = settings.sslmode.trim().parse().map_err(|_| {
        DbError::config(format!(
            "DB_SSLMODE '{}' is not one of disable, allow, prefer, require, verify-ca, verify-full",
            settings.sslmode
        ))
    })?;

    Ok(PgConnectOptions::new()
        .host(&settings.host)
        .port(port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.dbname)
        .ssl_mode(ssl_mode))
}

/// Open the pool with a single connection attempt.
///
/// # Errors
///
/// Returns `DbError::Config` for unusable settings and `DbError::Sqlx` when
/// the server is unreachable, rejects the credentials, or the database is
/// missing.
pub async fn connect(settings: &DatabaseSettings, pool: &PoolSettings) -> Result<PgPool, DbError> {
    let options = connect_options(settings)?;

    tracing::info!(
        target: "bookshelf-db",
        dsn = %settings.dsn_redacted(),
        max_connections = pool.max_connections,
        "connecting to postgres"
    );

    let pool = PgPoolOptions::new()
        .max_connections(pool.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(target: "bookshelf-db", "database pool ready");
    Ok(pool)
}

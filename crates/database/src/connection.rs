use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

/// Reported to the server as `application_name`.
const APPLICATION_NAME: &str = "stock-dashboard";

/// Establishes a connection pool to the PostgreSQL store.
///
/// The pool is the single store-client handle of the process. Whoever calls
/// this owns it and is expected to `close()` it on shutdown.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let options = connect_options(settings)?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(options)
        .await
        .map_err(DbError::ConnectionError)?;

    tracing::info!(
        max_connections = settings.max_connections,
        statement_timeout_ms = settings.statement_timeout_ms,
        "Database pool ready."
    );
    Ok(pool)
}

/// Builds connection options from a full URL when one is configured, otherwise
/// from the discrete host/port/user/password/name fields.
///
/// Every connection gets a server-side `statement_timeout`, so a runaway query
/// fails like any other store error instead of holding a request forever.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions, DbError> {
    let options = match &settings.url {
        Some(url) => PgConnectOptions::from_str(url.expose())
            .map_err(|e| DbError::ConnectionConfigError(format!("invalid database url: {e}")))?,
        None => PgConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(settings.password.expose())
            .database(&settings.name),
    };

    Ok(options
        .application_name(APPLICATION_NAME)
        .options([("statement_timeout", settings.statement_timeout_ms)]))
}

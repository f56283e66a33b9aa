use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(sqlx::Error),

    /// Any failure while running a report query: connectivity, a statement
    /// timeout, malformed SQL. Never retried.
    #[error("Query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),
}

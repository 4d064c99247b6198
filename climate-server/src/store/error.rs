//! Data store error types.

/// Errors that can occur when reading from a climate data store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No connection could be checked out of the pool
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Query preparation, execution or row decoding failed
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The database file does not exist
    #[error("database not found: {0}")]
    NotFound(String),

    /// A JSON fixture could not be read or parsed
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

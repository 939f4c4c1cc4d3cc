use thiserror::Error;

/// Core error type shared across Rowforge crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Database error reported by the store driver.
    #[error("database error: {0}")]
    Db(String),
    /// Schema or table missing, or catalog metadata unreadable. Fatal to a
    /// run; raised before any mutation.
    #[error("catalog error: {0}")]
    Catalog(String),
    /// A requested capability is not supported.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by Rowforge crates.
pub type Result<T> = std::result::Result<T, Error>;

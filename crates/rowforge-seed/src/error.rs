use thiserror::Error;

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Catalog or schema-level failure; fatal to the run.
    #[error(transparent)]
    Core(#[from] rowforge_core::Error),
    /// The store rejected a well-formed insert (e.g. a constraint this
    /// engine cannot see). Aborts the table, not the run; never retried.
    #[error("insert into `{schema}`.`{table}` failed after {inserted} rows: {source}")]
    Insert {
        schema: String,
        table: String,
        inserted: u64,
        #[source]
        source: sqlx::Error,
    },
    /// Driver-level failure outside an insert (sampling, truncation).
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Convenience alias for seeding results.
pub type Result<T> = std::result::Result<T, SeedError>;

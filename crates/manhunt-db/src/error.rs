//! Error types for the data layer.
//!
//! All failures are propagated via [`DbError`]. Most lookups degrade to
//! `Option::None` instead of erroring; only genuine database failures and
//! the unique-code constraint surface here.

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A player creation or update collided with an existing login code.
    ///
    /// The unique constraint on `players.code` is the only constraint the
    /// schema enforces on caller input; it is surfaced as its own variant so
    /// the UI layer can tell the admin which code is taken.
    #[error("login code already in use: {0}")]
    DuplicateCode(String),

    /// A row held a value the Rust side does not recognize (e.g. an unknown
    /// status label). Indicates schema drift, not caller error.
    #[error("unexpected row data: {0}")]
    Decode(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Wrap an [`sqlx::Error`], converting a unique-constraint violation
    /// into [`DbError::DuplicateCode`] for the given code.
    pub(crate) fn from_unique_violation(err: sqlx::Error, code: &str) -> Self {
        if matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation()) {
            return Self::DuplicateCode(code.to_owned());
        }
        Self::Postgres(err)
    }
}

// ================================================================
// File: wapi-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found error: {0}")]
    NotFound(String),

    /// A form was submitted with one or more required fields left empty.
    /// The display text is what the dashboard shows in its toast.
    #[error("Please fill in all required fields")]
    Validation { missing: Vec<&'static str> },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored value under `key` could not be decoded.
    #[error("Corrupt value under storage key '{key}': {source}")]
    CorruptStorage {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Field names a rejected form was missing, empty for every other variant.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Error::Validation { missing } => missing,
            _ => &[],
        }
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Error::Auth(format!("invalid session token: {err}"))
    }
}

//! Catalog error types.

use starweave_galaxy::UserId;

/// Errors raised while creating or listing custom stars.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The user already owns the maximum number of stars.
    #[error("user {user} already owns {limit} stars")]
    QuotaExceeded { user: UserId, limit: u32 },

    /// A required draft field was empty.
    #[error("star draft field `{0}` must not be empty")]
    InvalidDraft(&'static str),

    /// Reading or writing the store file failed.
    #[error("star store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The store file did not hold valid star records.
    #[error("star store data is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

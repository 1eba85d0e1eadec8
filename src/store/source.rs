//! The lookup interface attachment resolution runs against.

use crate::domain::MediaClass;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from an attachment store.
///
/// A missing attachment is not an error; lookups return `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The notes database does not exist.
    #[error(
        "Apple Notes database not found at {path}; pass --db or set `database` in the config file"
    )]
    DatabaseNotFound { path: PathBuf },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred while reading attachment content.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Binary content of a file attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAttachment {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
    pub media_class: MediaClass,
}

/// Read-only source of attachment data.
///
/// Both lookups are idempotent, so callers may retry them freely.
pub trait AttachmentSource {
    /// Returns the literal text of an inline attachment (hashtag, mention, ...).
    fn resolve_inline(&self, attachment_id: &str) -> StoreResult<Option<String>>;

    /// Returns the binary content of a file attachment.
    fn fetch_binary(&self, attachment_id: &str) -> StoreResult<Option<BinaryAttachment>>;
}

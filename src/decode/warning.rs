//! Recoverable problems noticed while decoding a note.

use std::fmt;

/// A locally recovered inconsistency, surfaced for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// Run lengths do not sum to the text length.
    RunLengthMismatch { covered: usize, text_len: usize },
    /// A placeholder had no attachment run to match; the fallback token was used.
    UnmatchedPlaceholder { position: usize },
    /// An attachment run's range held no placeholder; its resolution was dropped.
    UnconsumedRun { offset: usize },
    /// An attachment run carried no identifier.
    MissingAttachmentId { offset: usize },
    /// The attachment store failed (not a miss) after all retries.
    LookupFailed {
        attachment_id: String,
        message: String,
    },
    /// A resolved file could not be persisted.
    PersistFailed {
        attachment_id: String,
        message: String,
    },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::RunLengthMismatch { covered, text_len } => write!(
                f,
                "attribute runs cover {covered} characters but the text has {text_len}"
            ),
            DecodeWarning::UnmatchedPlaceholder { position } => {
                write!(f, "placeholder at {position} has no attachment run")
            }
            DecodeWarning::UnconsumedRun { offset } => {
                write!(f, "attachment run at {offset} has no placeholder")
            }
            DecodeWarning::MissingAttachmentId { offset } => {
                write!(f, "attachment run at {offset} has no identifier")
            }
            DecodeWarning::LookupFailed {
                attachment_id,
                message,
            } => write!(f, "lookup of attachment {attachment_id} failed: {message}"),
            DecodeWarning::PersistFailed {
                attachment_id,
                message,
            } => write!(f, "could not write attachment {attachment_id}: {message}"),
        }
    }
}

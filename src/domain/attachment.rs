//! Resolution records produced for attachment runs.

use crate::domain::{MediaClass, type_tag};

/// Token emitted for a placeholder that has no attachment run to match.
pub const UNMATCHED_TOKEN: &str = "[attachment]";

/// Fallback token for an attachment that could not be resolved.
///
/// Always `[<label>]`, where the label is the short type name (`hashtag`,
/// `image`, `drawing`, ...) or `attachment` for unknown types.
///
/// ```
/// use noteport::domain::fallback_token;
///
/// assert_eq!(fallback_token(Some("com.apple.notes.inlinetextattachment.hashtag")), "[hashtag]");
/// assert_eq!(fallback_token(None), "[attachment]");
/// ```
pub fn fallback_token(type_tag: Option<&str>) -> String {
    format!("[{}]", type_tag::label(type_tag))
}

/// Binary attachment content fetched for a file run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub identifier: String,
    pub suggested_filename: Option<String>,
    pub type_tag: Option<String>,
    pub media_class: MediaClass,
    pub data: Vec<u8>,
}

impl FileReference {
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

/// Kind of a resolution outcome, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    InlineText,
    FileReference,
    Unresolved,
}

/// Outcome of resolving one attachment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Literal text to substitute (hashtag label, mention name, ...).
    InlineText(String),
    /// File content still to be persisted.
    File(FileReference),
    /// Nothing could be resolved; carries the fallback token.
    Unresolved(String),
}

impl Resolution {
    pub fn kind(&self) -> ResolutionKind {
        match self {
            Resolution::InlineText(_) => ResolutionKind::InlineText,
            Resolution::File(_) => ResolutionKind::FileReference,
            Resolution::Unresolved(_) => ResolutionKind::Unresolved,
        }
    }
}

/// Resolution of one non-plain run, keyed by the run's character range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRecord {
    /// Start of the owning run (scalar position).
    pub offset: usize,
    /// End of the owning run, exclusive.
    pub end: usize,
    pub resolution: Resolution,
}

impl ResolutionRecord {
    pub fn kind(&self) -> ResolutionKind {
        self.resolution.kind()
    }
}

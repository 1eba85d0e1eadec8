//! Decoded note document: one text buffer plus ordered attribute runs.

use crate::domain::type_tag;

/// The character Apple Notes reserves for "an embedded object goes here".
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// What an attribute run annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
    /// Formatting only, no embedded object.
    Plain,
    /// Object resolved to a short literal (hashtag, mention, ...).
    InlineAttachment,
    /// Object backed by a binary file (image, PDF, ...).
    FileAttachment,
    /// Object with no text rendering (drawing, table, unknown type).
    UnsupportedEmbed,
}

impl RunKind {
    /// Returns true for runs that carry no embedded object.
    pub fn is_plain(self) -> bool {
        self == RunKind::Plain
    }
}

/// A contiguous annotated range of the text buffer.
///
/// Only the length is stored; absolute offsets are derived by walking the
/// runs in order (see [`crate::decode::walk`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub length: usize,
    pub kind: RunKind,
    pub attachment_id: Option<String>,
    pub type_tag: Option<String>,
}

impl Run {
    /// Creates a run with no attachment.
    pub fn plain(length: usize) -> Self {
        Self {
            length,
            kind: RunKind::Plain,
            attachment_id: None,
            type_tag: None,
        }
    }

    /// Creates a run carrying attachment metadata.
    ///
    /// The kind is derived from the type tag; a missing or unknown tag makes
    /// the run an unsupported embed.
    pub fn attachment(
        length: usize,
        attachment_id: Option<String>,
        type_tag: Option<String>,
    ) -> Self {
        let kind = type_tag::classify(type_tag.as_deref());
        Self {
            length,
            kind,
            attachment_id,
            type_tag,
        }
    }

    /// Short human label for the run's attachment type.
    pub fn type_label(&self) -> &'static str {
        type_tag::label(self.type_tag.as_deref())
    }
}

/// A decoded note body.
///
/// Invariant expected from well-formed input: the run lengths sum to the
/// length of `text`. The decoder does not enforce it; the run walker reports
/// and clamps violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    runs: Vec<Run>,
}

impl Document {
    pub fn new(text: impl Into<String>, runs: Vec<Run>) -> Self {
        Self {
            text: text.into(),
            runs,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Number of object replacement characters in the text.
    pub fn placeholder_count(&self) -> usize {
        self.text
            .chars()
            .filter(|&c| c == OBJECT_REPLACEMENT)
            .count()
    }

    /// Number of runs that carry an embedded object.
    pub fn attachment_run_count(&self) -> usize {
        self.runs.iter().filter(|r| !r.kind.is_plain()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_run_has_no_attachment() {
        let run = Run::plain(4);
        assert_eq!(run.kind, RunKind::Plain);
        assert!(run.attachment_id.is_none());
        assert!(run.type_tag.is_none());
    }

    #[test]
    fn attachment_run_is_classified_from_tag() {
        let run = Run::attachment(
            1,
            Some("X".into()),
            Some("com.apple.notes.inlinetextattachment.hashtag".into()),
        );
        assert_eq!(run.kind, RunKind::InlineAttachment);
        assert_eq!(run.type_label(), "hashtag");

        let run = Run::attachment(1, Some("Y".into()), Some("public.jpeg".into()));
        assert_eq!(run.kind, RunKind::FileAttachment);
    }

    #[test]
    fn attachment_run_without_tag_is_unsupported() {
        let run = Run::attachment(1, Some("Z".into()), None);
        assert_eq!(run.kind, RunKind::UnsupportedEmbed);
        assert_eq!(run.type_label(), "attachment");
    }

    #[test]
    fn document_counts_placeholders_and_attachment_runs() {
        let doc = Document::new(
            "a\u{FFFC}b\u{FFFC}",
            vec![
                Run::plain(1),
                Run::attachment(1, None, Some("hashtag".into())),
                Run::plain(1),
                Run::attachment(1, None, Some("com.apple.drawing".into())),
            ],
        );
        assert_eq!(doc.placeholder_count(), 2);
        assert_eq!(doc.attachment_run_count(), 2);
    }
}

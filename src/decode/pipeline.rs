//! The per-note decode pipeline.

use crate::decode::decompress::{DecompressionError, decompress};
use crate::decode::resolver::{DEFAULT_LOOKUP_ATTEMPTS, Resolver};
use crate::decode::schema::{SchemaDecodeError, decode_document};
use crate::decode::sink::AttachmentSink;
use crate::decode::substitute::{Placement, substitute};
use crate::decode::walker::{LengthUnit, Span, walk};
use crate::decode::warning::DecodeWarning;
use crate::domain::{Document, MediaClass, Resolution, fallback_token};
use crate::store::AttachmentSource;
use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

/// Knobs for [`decode_note`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub length_unit: LengthUnit,
    pub lookup_attempts: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            length_unit: LengthUnit::default(),
            lookup_attempts: DEFAULT_LOOKUP_ATTEMPTS,
        }
    }
}

/// Failures that prevent a note body from being decoded at all.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Decompression(#[from] DecompressionError),

    #[error(transparent)]
    Schema(#[from] SchemaDecodeError),
}

/// A file attachment written for a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenAttachment {
    pub relative_path: String,
    pub media_class: MediaClass,
}

/// The decoded body of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedNote {
    pub text: String,
    pub attachments_written: Vec<WrittenAttachment>,
    pub warnings: Vec<DecodeWarning>,
}

/// Decodes a raw note blob into markdown text.
///
/// Runs decompress, decode, walk, resolve and substitute in that order.
/// Only an unreadable blob is an error; everything after decoding degrades
/// per attachment and is reported in [`DecodedNote::warnings`].
///
/// # Errors
///
/// Returns `DecodeError::Decompression` for a corrupt gzip stream and
/// `DecodeError::Schema` when no note text can be read.
pub fn decode_note<S, K>(
    blob: &[u8],
    source: &S,
    sink: &mut K,
    options: &DecodeOptions,
) -> Result<DecodedNote, DecodeError>
where
    S: AttachmentSource + ?Sized,
    K: AttachmentSink + ?Sized,
{
    let bytes = decompress(blob)?;
    let document = decode_document(&bytes)?;
    debug!(
        "decoded document: {} runs, {} placeholders",
        document.runs().len(),
        document.placeholder_count()
    );
    Ok(render_document(&document, source, sink, options))
}

/// Renders an already decoded document.
pub fn render_document<S, K>(
    document: &Document,
    source: &S,
    sink: &mut K,
    options: &DecodeOptions,
) -> DecodedNote
where
    S: AttachmentSource + ?Sized,
    K: AttachmentSink + ?Sized,
{
    let mut warnings = Vec::new();

    let walk = walk(document, options.length_unit);
    if let Some(mismatch) = walk.mismatch {
        warnings.push(DecodeWarning::RunLengthMismatch {
            covered: mismatch.covered,
            text_len: mismatch.text_len,
        });
    }

    let resolved = Resolver::new(source)
        .with_attempts(options.lookup_attempts)
        .resolve(&walk.runs);
    warnings.extend(resolved.warnings);

    let placements: Vec<_> = resolved
        .records
        .into_iter()
        .map(|record| Placement::new(Span::new(record.offset, record.end), record.resolution))
        .collect();

    // Files are persisted only once a placeholder consumes them
    let mut attachments_written = Vec::new();
    let mut persist_warnings = Vec::new();
    let substitution = substitute(document.text(), placements, |resolution| match resolution {
        Resolution::InlineText(text) => text,
        Resolution::Unresolved(token) => token,
        Resolution::File(file) => match sink.persist(&file) {
            Ok(relative_path) => {
                let markdown = file_link(&relative_path, file.media_class);
                attachments_written.push(WrittenAttachment {
                    relative_path,
                    media_class: file.media_class,
                });
                markdown
            }
            Err(err) => {
                persist_warnings.push(DecodeWarning::PersistFailed {
                    attachment_id: file.identifier.clone(),
                    message: err.to_string(),
                });
                fallback_token(file.type_tag.as_deref())
            }
        },
    });
    warnings.extend(persist_warnings);
    warnings.extend(substitution.warnings);

    for warning in &warnings {
        warn!("{warning}");
    }

    DecodedNote {
        text: substitution.text,
        attachments_written,
        warnings,
    }
}

/// Markdown reference to a written attachment.
///
/// Images embed; everything else links by file name. Paths containing
/// whitespace or parentheses are wrapped in angle brackets.
pub fn file_link(relative_path: &str, media_class: MediaClass) -> String {
    let target = if relative_path
        .chars()
        .any(|c| c.is_whitespace() || c == '(' || c == ')')
    {
        format!("<{relative_path}>")
    } else {
        relative_path.to_string()
    };

    if media_class.is_image() {
        format!("![attachment]({target})")
    } else {
        let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        format!("[{name}]({target})")
    }
}

//! Attachment classification and resolution.

use crate::decode::walker::WalkedRun;
use crate::decode::warning::DecodeWarning;
use crate::domain::{
    FileReference, Resolution, ResolutionRecord, Run, RunKind, fallback_token, type_tag,
};
use crate::store::{AttachmentSource, StoreResult};
use log::{debug, trace};

/// Default number of attempts per lookup.
pub const DEFAULT_LOOKUP_ATTEMPTS: u32 = 2;

/// Records for all attachment runs of a note, plus what went wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    /// One record per non-plain run, in offset order.
    pub records: Vec<ResolutionRecord>,
    pub warnings: Vec<DecodeWarning>,
}

/// Resolves attachment runs against an [`AttachmentSource`].
///
/// Every non-plain run yields exactly one record. Misses and store failures
/// become `Resolution::Unresolved` carrying the run's fallback token; store
/// failures are retried up to the configured number of attempts first.
pub struct Resolver<'s, S: AttachmentSource + ?Sized> {
    source: &'s S,
    attempts: u32,
}

impl<'s, S: AttachmentSource + ?Sized> Resolver<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self {
            source,
            attempts: DEFAULT_LOOKUP_ATTEMPTS,
        }
    }

    /// Sets the number of attempts per lookup (at least one).
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Resolves every non-plain run in walk order.
    pub fn resolve(&self, runs: &[WalkedRun<'_>]) -> Resolved {
        let mut resolved = Resolved::default();
        for walked in runs.iter().filter(|w| !w.run.kind.is_plain()) {
            let resolution = self.resolve_run(walked, &mut resolved.warnings);
            resolved.records.push(ResolutionRecord {
                offset: walked.span.start,
                end: walked.span.end,
                resolution,
            });
        }
        resolved
    }

    fn resolve_run(&self, walked: &WalkedRun<'_>, warnings: &mut Vec<DecodeWarning>) -> Resolution {
        let run = walked.run;
        let unresolved = || Resolution::Unresolved(fallback_token(run.type_tag.as_deref()));

        if run.kind == RunKind::UnsupportedEmbed {
            trace!("unsupported {} embed at {}", run.type_label(), walked.span.start);
            return unresolved();
        }

        let Some(id) = run.attachment_id.as_deref() else {
            warnings.push(DecodeWarning::MissingAttachmentId {
                offset: walked.span.start,
            });
            return unresolved();
        };

        let outcome = match run.kind {
            RunKind::InlineAttachment => self
                .with_retry(id, || self.source.resolve_inline(id))
                .map(|text| text.and_then(|t| inline_literal(&t, run).map(Resolution::InlineText))),
            RunKind::FileAttachment => self
                .with_retry(id, || self.source.fetch_binary(id))
                .map(|binary| {
                    binary
                        .filter(|b| !b.bytes.is_empty())
                        .map(|b| {
                            Resolution::File(FileReference {
                                identifier: id.to_string(),
                                suggested_filename: b.filename,
                                type_tag: run.type_tag.clone(),
                                media_class: b.media_class,
                                data: b.bytes,
                            })
                        })
                }),
            RunKind::Plain | RunKind::UnsupportedEmbed => Ok(None),
        };

        match outcome {
            Ok(Some(resolution)) => resolution,
            Ok(None) => {
                debug!("{} attachment {id} did not resolve", run.type_label());
                unresolved()
            }
            Err(err) => {
                warnings.push(DecodeWarning::LookupFailed {
                    attachment_id: id.to_string(),
                    message: err.to_string(),
                });
                unresolved()
            }
        }
    }

    fn with_retry<T>(
        &self,
        attachment_id: &str,
        mut lookup: impl FnMut() -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut attempt = 1;
        loop {
            match lookup() {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.attempts => {
                    debug!("lookup of {attachment_id} failed (attempt {attempt}): {err}");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Trims an inline literal and enforces its type's prefix.
///
/// Returns `None` for blank literals, which count as a miss.
fn inline_literal(raw: &str, run: &Run) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match type_tag::inline_prefix(run.type_tag.as_deref()) {
        Some(prefix) if !trimmed.starts_with(prefix) => Some(format!("{prefix}{trimmed}")),
        _ => Some(trimmed.to_string()),
    }
}

//! Placeholder substitution.

use crate::decode::sanitize::remove_artifacts;
use crate::decode::walker::Span;
use crate::decode::warning::DecodeWarning;
use crate::domain::{OBJECT_REPLACEMENT, UNMATCHED_TOKEN};

/// What one attachment run will be replaced with, once consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<T> {
    pub span: Span,
    pub value: T,
}

impl<T> Placement<T> {
    pub fn new(span: Span, value: T) -> Self {
        Self { span, value }
    }
}

/// Output of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    pub warnings: Vec<DecodeWarning>,
}

/// Replaces every placeholder in `text` with its placement's rendering.
///
/// `placements` must be in ascending span order, which the run walker
/// guarantees. A placeholder at position `p` consumes the next placement
/// whose span contains `p`. Placements that end at or before `p` without
/// being consumed are skipped with a warning; a placeholder with no
/// placement gets [`UNMATCHED_TOKEN`].
///
/// `render` is called once per consumed placement, in text order, and never
/// for a skipped one. Source text between placeholders goes through
/// [`remove_artifacts`]; rendered replacements are copied verbatim. The
/// output never contains a raw placeholder.
pub fn substitute<T, F>(
    text: &str,
    placements: Vec<Placement<T>>,
    mut render: F,
) -> Substitution
where
    F: FnMut(T) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut warnings = Vec::new();
    let mut pending = placements.into_iter().peekable();
    let mut segment_start = 0usize;

    for (position, (index, c)) in text.char_indices().enumerate() {
        if c != OBJECT_REPLACEMENT {
            continue;
        }
        out.push_str(&remove_artifacts(&text[segment_start..index]));
        segment_start = index + c.len_utf8();

        while let Some(skipped) = pending.next_if(|p| p.span.end <= position) {
            warnings.push(DecodeWarning::UnconsumedRun {
                offset: skipped.span.start,
            });
        }

        match pending.next_if(|p| p.span.contains(position)) {
            Some(placement) => out.push_str(&render(placement.value)),
            None => {
                warnings.push(DecodeWarning::UnmatchedPlaceholder { position });
                out.push_str(UNMATCHED_TOKEN);
            }
        }
    }
    out.push_str(&remove_artifacts(&text[segment_start..]));

    warnings.extend(pending.map(|p| DecodeWarning::UnconsumedRun {
        offset: p.span.start,
    }));

    Substitution { text: out, warnings }
}

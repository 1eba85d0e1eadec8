//! Attribute run walker: run lengths to absolute character ranges.

use crate::domain::{Document, Run};
use serde::Deserialize;

/// Unit in which attribute run lengths are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Unicode scalar values (Rust `char`s).
    #[default]
    Scalar,
    /// UTF-16 code units, as Apple Notes counts them.
    Utf16,
}

impl LengthUnit {
    /// Length of `text` in this unit.
    pub fn measure(self, text: &str) -> usize {
        match self {
            LengthUnit::Scalar => text.chars().count(),
            LengthUnit::Utf16 => text.encode_utf16().count(),
        }
    }
}

/// Half-open range of scalar positions in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }
}

/// A run together with its derived range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkedRun<'a> {
    pub span: Span,
    pub run: &'a Run,
}

/// Run lengths did not add up to the text length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    /// Sum of run lengths, in the walk's unit.
    pub covered: usize,
    /// Text length, in the walk's unit.
    pub text_len: usize,
}

/// Result of walking a document's runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk<'a> {
    pub runs: Vec<WalkedRun<'a>>,
    pub mismatch: Option<LengthMismatch>,
}

impl<'a> Walk<'a> {
    /// Non-plain runs in offset order.
    pub fn attachment_runs(&self) -> impl Iterator<Item = &WalkedRun<'a>> {
        self.runs.iter().filter(|w| !w.run.kind.is_plain())
    }
}

/// Derives `[start, end)` ranges for every run by accumulating lengths.
///
/// Ranges are always expressed in scalar positions, whatever unit the lengths
/// are counted in. When the lengths do not sum to the text length the walk
/// still succeeds: ranges past the end are clamped to it, uncovered trailing
/// text is left plain, and the mismatch is reported.
pub fn walk(document: &Document, unit: LengthUnit) -> Walk<'_> {
    let text = document.text();
    let text_len = unit.measure(text);
    let positions = PositionMap::new(text, unit);

    let mut offset = 0usize;
    let mut runs = Vec::with_capacity(document.runs().len());
    for run in document.runs() {
        let start = offset;
        let end = offset.saturating_add(run.length);
        offset = end;

        let span = Span::new(
            positions.to_scalar(start.min(text_len)),
            positions.to_scalar(end.min(text_len)),
        );
        runs.push(WalkedRun { span, run });
    }

    // A document without runs is unformatted text, not a mismatch
    let has_runs = !document.runs().is_empty();
    let mismatch = (has_runs && offset != text_len).then_some(LengthMismatch {
        covered: offset,
        text_len,
    });

    Walk { runs, mismatch }
}

/// Maps offsets in a length unit back to scalar positions.
enum PositionMap {
    Identity,
    /// UTF-16 offset at which each scalar starts.
    Utf16(Vec<usize>),
}

impl PositionMap {
    fn new(text: &str, unit: LengthUnit) -> Self {
        match unit {
            LengthUnit::Scalar => PositionMap::Identity,
            LengthUnit::Utf16 => {
                let mut starts = Vec::with_capacity(text.len());
                let mut offset = 0;
                for c in text.chars() {
                    starts.push(offset);
                    offset += c.len_utf16();
                }
                PositionMap::Utf16(starts)
            }
        }
    }

    /// Scalar position of a unit offset; offsets inside a surrogate pair
    /// round up to the next scalar.
    fn to_scalar(&self, offset: usize) -> usize {
        match self {
            PositionMap::Identity => offset,
            PositionMap::Utf16(starts) => starts.partition_point(|&s| s < offset),
        }
    }
}

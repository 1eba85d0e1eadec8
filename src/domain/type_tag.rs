//! Attachment type identifiers (UTIs) and what they mean for export.
//!
//! Classification is an allow-list lookup on the type tag stored in the note;
//! attachment content is never inspected. Each known tag maps to a short label
//! (used in fallback tokens), a run kind and, for files, a media class and a
//! default extension.

use crate::domain::RunKind;
use serde::Serialize;
use std::fmt;

/// Broad media class of a file attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaClass {
    Image,
    Pdf,
    Video,
    Audio,
    File,
}

impl MediaClass {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaClass::Image => "image",
            MediaClass::Pdf => "pdf",
            MediaClass::Video => "video",
            MediaClass::Audio => "audio",
            MediaClass::File => "file",
        }
    }

    pub fn is_image(self) -> bool {
        self == MediaClass::Image
    }
}

impl fmt::Display for MediaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Export semantics of one known type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    pub label: &'static str,
    pub kind: RunKind,
    pub media: Option<MediaClass>,
    pub extension: Option<&'static str>,
    /// Prefix an inline literal must carry (`#` for hashtags, `@` for mentions).
    pub prefix: Option<char>,
}

const fn inline(label: &'static str, prefix: Option<char>) -> TypeInfo {
    TypeInfo {
        label,
        kind: RunKind::InlineAttachment,
        media: None,
        extension: None,
        prefix,
    }
}

const fn file(label: &'static str, media: MediaClass, extension: Option<&'static str>) -> TypeInfo {
    TypeInfo {
        label,
        kind: RunKind::FileAttachment,
        media: Some(media),
        extension,
        prefix: None,
    }
}

const fn unsupported(label: &'static str) -> TypeInfo {
    TypeInfo {
        label,
        kind: RunKind::UnsupportedEmbed,
        media: None,
        extension: None,
        prefix: None,
    }
}

/// Label used when the type is unknown or absent.
pub const UNKNOWN_LABEL: &str = "attachment";

static KNOWN_TYPES: &[(&str, TypeInfo)] = &[
    // Inline text attachments
    ("com.apple.notes.inlinetextattachment.hashtag", inline("hashtag", Some('#'))),
    ("com.apple.notes.inlinetextattachment.mention", inline("mention", Some('@'))),
    ("com.apple.notes.inlinetextattachment.link", inline("link", None)),
    ("com.apple.notes.inlinetextattachment.calculateresult", inline("calculation", None)),
    (
        "com.apple.notes.inlinetextattachment.calculategraphexpression",
        inline("calculation", None),
    ),
    ("hashtag", inline("hashtag", Some('#'))),
    ("mention", inline("mention", Some('@'))),
    // Images
    ("public.jpeg", file("image", MediaClass::Image, Some("jpg"))),
    ("public.png", file("image", MediaClass::Image, Some("png"))),
    ("public.heic", file("image", MediaClass::Image, Some("heic"))),
    ("public.tiff", file("image", MediaClass::Image, Some("tiff"))),
    ("com.compuserve.gif", file("image", MediaClass::Image, Some("gif"))),
    ("public.image", file("image", MediaClass::Image, None)),
    ("image", file("image", MediaClass::Image, None)),
    // Documents
    ("com.adobe.pdf", file("pdf", MediaClass::Pdf, Some("pdf"))),
    ("pdf", file("pdf", MediaClass::Pdf, Some("pdf"))),
    // Video
    ("public.mpeg-4", file("video", MediaClass::Video, Some("mp4"))),
    ("com.apple.quicktime-movie", file("video", MediaClass::Video, Some("mov"))),
    ("public.movie", file("video", MediaClass::Video, None)),
    ("video", file("video", MediaClass::Video, None)),
    // Audio
    ("com.apple.m4a-audio", file("audio", MediaClass::Audio, Some("m4a"))),
    ("public.mpeg-4-audio", file("audio", MediaClass::Audio, Some("m4a"))),
    ("public.mp3", file("audio", MediaClass::Audio, Some("mp3"))),
    ("public.audio", file("audio", MediaClass::Audio, None)),
    ("audio", file("audio", MediaClass::Audio, None)),
    // Generic files
    ("public.plain-text", file("file", MediaClass::File, Some("txt"))),
    ("public.vcard", file("file", MediaClass::File, Some("vcf"))),
    ("public.data", file("file", MediaClass::File, None)),
    // Embeds with no text rendering
    ("com.apple.drawing", unsupported("drawing")),
    ("com.apple.drawing.2", unsupported("drawing")),
    ("com.apple.paper", unsupported("drawing")),
    ("com.apple.notes.table", unsupported("table")),
    ("com.apple.notes.gallery", unsupported("gallery")),
    ("public.url", unsupported("url")),
];

/// Looks up a type tag (ASCII case-insensitive).
pub fn lookup(type_tag: &str) -> Option<&'static TypeInfo> {
    let tag = type_tag.trim();
    KNOWN_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(tag))
        .map(|(_, info)| info)
}

/// Classifies a run's attachment by its type tag.
///
/// Unknown and absent tags classify as [`RunKind::UnsupportedEmbed`].
pub fn classify(type_tag: Option<&str>) -> RunKind {
    type_tag
        .and_then(lookup)
        .map_or(RunKind::UnsupportedEmbed, |info| info.kind)
}

/// Short label for a type tag, `"attachment"` when unknown.
pub fn label(type_tag: Option<&str>) -> &'static str {
    type_tag
        .and_then(lookup)
        .map_or(UNKNOWN_LABEL, |info| info.label)
}

/// Media class for a type tag, [`MediaClass::File`] when unknown.
pub fn media_class(type_tag: Option<&str>) -> MediaClass {
    type_tag
        .and_then(lookup)
        .and_then(|info| info.media)
        .unwrap_or(MediaClass::File)
}

/// Default file extension implied by a type tag.
pub fn extension(type_tag: Option<&str>) -> Option<&'static str> {
    type_tag.and_then(lookup).and_then(|info| info.extension)
}

/// Prefix an inline literal of this type must start with.
pub fn inline_prefix(type_tag: Option<&str>) -> Option<char> {
    type_tag.and_then(lookup).and_then(|info| info.prefix)
}

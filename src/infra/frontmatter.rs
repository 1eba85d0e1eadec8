//! YAML frontmatter for exported markdown notes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Timestamp format written to frontmatter (UTC, millisecond precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Metadata block at the top of an exported note.
///
/// Fields serialize in declaration order; absent optional fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frontmatter {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Set when the body could not be decoded and was left empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
}

impl Frontmatter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn created(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.created = at.map(format_timestamp);
        self
    }

    pub fn updated(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.updated = at.map(format_timestamp);
        self
    }

    pub fn tag(mut self, tag: Option<&str>) -> Self {
        if let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) {
            self.tags.push(tag.to_string());
        }
        self
    }

    pub fn decode_error(mut self, message: Option<String>) -> Self {
        self.decode_error = message;
        self
    }
}

/// Formats a timestamp as `2024-01-15T10:30:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Serializes frontmatter and body to a markdown document.
///
/// # Format
/// ```text
/// ---
/// title: Note Title
/// created: 2024-01-15T10:30:00.000Z
/// updated: 2024-01-16T14:00:00.000Z
/// tags:
/// - Folder
/// ---
///
/// Body content here...
/// ```
pub fn serialize(frontmatter: &Frontmatter, body: &str) -> String {
    let yaml = serde_yaml::to_string(frontmatter).expect("Frontmatter serialization is infallible");
    format!("---\n{yaml}---\n\n{body}\n")
}

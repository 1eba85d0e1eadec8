//! Builder for test notes with sensible defaults.

// Allow dead code since this is a test utility shared by several test binaries
#![allow(dead_code)]

use crate::common::blob::NoteBlob;

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z.
const APPLE_EPOCH_OFFSET: i64 = 978_307_200;

/// Builder for a row of the notes table.
///
/// Timestamps are seconds since the Apple epoch, as Notes stores them.
/// The body defaults to a gzipped blob holding the title as plain text.
#[derive(Debug, Clone)]
pub struct TestNote {
    title: String,
    folder: Option<String>,
    snippet: Option<String>,
    body: Option<Vec<u8>>,
    created: f64,
    modified: f64,
    deleted: bool,
}

impl TestNote {
    /// Creates a new test note with the given title.
    ///
    /// Both timestamps are set to 2024-01-15T10:30:00Z.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let body = NoteBlob::new(&title).gzip();
        Self {
            title,
            folder: None,
            snippet: None,
            body: Some(body),
            created: 727_007_400.0,
            modified: 727_007_400.0,
            deleted: false,
        }
    }

    /// Places the note in a folder, created on demand.
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Sets the snippet column.
    pub fn snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Uses `blob` as the gzipped body.
    pub fn blob(mut self, blob: &NoteBlob) -> Self {
        self.body = Some(blob.gzip());
        self
    }

    /// Stores raw bytes as the body, compressed or not.
    pub fn raw_body(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.body = Some(bytes.into());
        self
    }

    /// Leaves the note without a body row.
    pub fn no_body(mut self) -> Self {
        self.body = None;
        self
    }

    /// Sets the creation time, in Apple epoch seconds.
    pub fn created(mut self, seconds: f64) -> Self {
        self.created = seconds;
        self
    }

    /// Sets the modification time, in Apple epoch seconds.
    pub fn modified(mut self, seconds: f64) -> Self {
        self.modified = seconds;
        self
    }

    /// Sets the modification time from a Unix timestamp.
    pub fn modified_unix(self, unix_seconds: i64) -> Self {
        self.modified((unix_seconds - APPLE_EPOCH_OFFSET) as f64)
    }

    /// Marks the note as deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    // ===========================================
    // Getters used by TestEnv
    // ===========================================

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn get_folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    pub fn get_snippet(&self) -> Option<&str> {
        self.snippet.as_deref()
    }

    pub fn get_body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn get_created(&self) -> f64 {
        self.created
    }

    pub fn get_modified(&self) -> f64 {
        self.modified
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

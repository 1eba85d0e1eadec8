//! In-memory attachment source.

use super::{AttachmentSource, BinaryAttachment, StoreResult};
use crate::domain::MediaClass;
use std::collections::HashMap;

/// Attachment source backed by hash maps.
///
/// Used for decoding standalone blobs (where nothing resolves) and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAttachments {
    inline: HashMap<String, String>,
    binaries: HashMap<String, BinaryAttachment>,
}

impl MemoryAttachments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inline literal (builder style).
    pub fn with_inline(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert_inline(id, text);
        self
    }

    /// Adds a file attachment (builder style).
    pub fn with_file(
        mut self,
        id: impl Into<String>,
        filename: Option<&str>,
        media_class: MediaClass,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert_binary(
            id,
            BinaryAttachment {
                filename: filename.map(str::to_string),
                bytes: bytes.into(),
                media_class,
            },
        );
        self
    }

    pub fn insert_inline(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.inline.insert(id.into(), text.into());
    }

    pub fn insert_binary(&mut self, id: impl Into<String>, binary: BinaryAttachment) {
        self.binaries.insert(id.into(), binary);
    }
}

impl AttachmentSource for MemoryAttachments {
    fn resolve_inline(&self, attachment_id: &str) -> StoreResult<Option<String>> {
        Ok(self.inline.get(attachment_id).cloned())
    }

    fn fetch_binary(&self, attachment_id: &str) -> StoreResult<Option<BinaryAttachment>> {
        Ok(self.binaries.get(attachment_id).cloned())
    }
}

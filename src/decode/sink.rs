//! Where resolved file attachments go.

use crate::domain::FileReference;
use crate::infra::{FilenameRegistry, FsError, attachment_candidate};

/// Persists file attachments and names them.
///
/// Takes `&mut self` because implementations own a filename registry, and
/// a registry must have a single writer.
pub trait AttachmentSink {
    /// Stores the file and returns its path relative to the note.
    fn persist(&mut self, file: &FileReference) -> Result<String, FsError>;
}

/// A bare registry names files without writing them anywhere.
impl AttachmentSink for FilenameRegistry {
    fn persist(&mut self, file: &FileReference) -> Result<String, FsError> {
        Ok(self.register(&attachment_candidate(file)))
    }
}

//! Attachment and note sources.
//!
//! [`AttachmentSource`] is the lookup seam the decoder resolves against.
//! [`NoteStore`] implements it over the Apple Notes database;
//! [`MemoryAttachments`] implements it over hash maps.

mod memory;
mod source;
mod sqlite;

pub use memory::MemoryAttachments;
pub use source::{AttachmentSource, BinaryAttachment, StoreError, StoreResult};
pub use sqlite::{DEFAULT_BUSY_TIMEOUT, NoteStore};

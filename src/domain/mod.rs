//! Core types: Document, Run, resolution records, attachment types, AppleNote

mod attachment;
mod document;
mod note;
pub mod type_tag;

pub use attachment::{
    FileReference, Resolution, ResolutionKind, ResolutionRecord, UNMATCHED_TOKEN, fallback_token,
};
pub use document::{Document, OBJECT_REPLACEMENT, Run, RunKind};
pub use note::{APPLE_EPOCH_OFFSET, AppleNote, from_apple_timestamp};
pub use type_tag::{MediaClass, TypeInfo};

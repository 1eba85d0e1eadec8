//! File output, filename handling, frontmatter

mod dedup;
mod frontmatter;
mod fs;
mod slug;

pub use dedup::{FilenameRegistry, attachment_candidate, split_extension};
pub use frontmatter::{Frontmatter, TIMESTAMP_FORMAT, format_timestamp, serialize};
pub use fs::{AttachmentDir, FsError, ensure_dir, write_atomic};
pub use slug::{note_filename, sanitize_filename, slugify};

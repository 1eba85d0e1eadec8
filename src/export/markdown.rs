//! Markdown document for one exported note.

use crate::domain::AppleNote;
use crate::infra::{Frontmatter, serialize};

/// Renders a note as frontmatter plus body.
///
/// The folder becomes the only tag. `decode_error` marks a note whose body
/// could not be decoded.
pub fn render_markdown(note: &AppleNote, body: &str, decode_error: Option<String>) -> String {
    let frontmatter = Frontmatter::new(note.title.as_str())
        .created(note.created)
        .updated(note.modified)
        .tag(note.folder.as_deref())
        .decode_error(decode_error);
    serialize(&frontmatter, body)
}

//! Markdown export of Apple Notes.

mod markdown;
mod session;

pub use markdown::render_markdown;
pub use session::{
    DEFAULT_ATTACHMENTS_DIR, ExportOptions, ExportSession, ExportSummary, ExportedNote,
    NoopReporter, NoteOutcome, ProgressReporter,
};

//! Command handlers for the CLI.

mod completions;
mod decode;
mod export;
mod list;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::config::Config;
use crate::domain::AppleNote;
use crate::export::{ExportSummary, NoteOutcome, ProgressReporter};
use crate::store::NoteStore;

// Re-export public items
pub use completions::handle_completions;
pub use decode::handle_decode;
pub use export::handle_export;
pub use list::handle_list;

// ===========================================
// Shared Utilities
// ===========================================

/// Progress reporter that prints to stdout.
pub(crate) struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub(crate) fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn on_note(&mut self, note: &AppleNote, outcome: &NoteOutcome) {
        match outcome {
            NoteOutcome::Exported {
                path,
                attachments,
                warnings,
                decode_error,
            } if self.verbose => {
                let mut line = format!("  exported: {path}");
                if !attachments.is_empty() {
                    line.push_str(&format!(" ({} attachments)", attachments.len()));
                }
                if *warnings > 0 {
                    line.push_str(&format!(" [{warnings} warnings]"));
                }
                if *decode_error {
                    line.push_str(" [body not decoded]");
                }
                println!("{line}");
            }
            NoteOutcome::Skipped if self.verbose => println!("  skipped: {}", note.title),
            NoteOutcome::Failed(msg) => eprintln!("  error: {}: {}", note.title, msg),
            _ => {}
        }
    }

    fn on_complete(&mut self, summary: &ExportSummary) {
        let verb = if summary.dry_run {
            "Would export"
        } else {
            "Exported"
        };
        let line = format!(
            "{} {} notes with {} attachments",
            verb, summary.exported, summary.attachments
        );
        if summary.failed > 0 {
            eprintln!("{line}; {} failed", summary.failed);
        } else {
            println!("{line}");
        }
    }
}

/// Opens the notes database named by `--db`, the config file, or the
/// standard location.
pub(crate) fn open_store(cli_db: Option<&PathBuf>, config: &Config) -> Result<NoteStore> {
    let path = config
        .database(cli_db)
        .context("cannot locate the Apple Notes database; pass --db")?;
    Ok(NoteStore::open_with_timeout(&path, config.busy_timeout())?)
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

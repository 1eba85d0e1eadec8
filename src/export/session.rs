//! Export of many notes into one output directory.

use crate::decode::{
    DecodeError, DecodeOptions, WrittenAttachment, decode_note, remove_artifacts, tidy,
};
use crate::domain::AppleNote;
use crate::export::markdown::render_markdown;
use crate::infra::{
    AttachmentDir, FilenameRegistry, FsError, ensure_dir, note_filename, write_atomic,
};
use crate::store::AttachmentSource;
use log::{debug, info, warn};
use serde::Serialize;
use std::path::PathBuf;

/// Default attachment directory name below the output directory.
pub const DEFAULT_ATTACHMENTS_DIR: &str = "attachments";

/// Settings for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    /// Attachment directory, relative to `output_dir`.
    pub attachments_dir: String,
    pub decode: DecodeOptions,
    /// Collapse blank lines and trim note bodies.
    pub tidy: bool,
    /// Also turn smart punctuation into ASCII while tidying.
    pub normalize_punctuation: bool,
    pub dry_run: bool,
    pub max_notes: Option<usize>,
    pub folder: Option<String>,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            attachments_dir: DEFAULT_ATTACHMENTS_DIR.to_string(),
            decode: DecodeOptions::default(),
            tidy: true,
            normalize_punctuation: false,
            dry_run: false,
            max_notes: None,
            folder: None,
        }
    }
}

/// What happened to one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOutcome {
    /// Written (or would have been, in a dry run).
    Exported {
        path: String,
        attachments: Vec<WrittenAttachment>,
        warnings: usize,
        decode_error: bool,
    },
    /// Left out by the folder filter.
    Skipped,
    /// Nothing written; the message says why.
    Failed(String),
}

/// Trait for receiving progress updates during an export.
pub trait ProgressReporter {
    /// Called after each note.
    fn on_note(&mut self, note: &AppleNote, outcome: &NoteOutcome);
    /// Called when the export is complete.
    fn on_complete(&mut self, summary: &ExportSummary);
}

/// A no-op progress reporter.
#[derive(Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_note(&mut self, _note: &AppleNote, _outcome: &NoteOutcome) {}
    fn on_complete(&mut self, _summary: &ExportSummary) {}
}

/// One exported note in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedNote {
    pub title: String,
    pub path: String,
    pub attachments: Vec<WrittenAttachment>,
    pub warnings: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub decode_error: bool,
}

/// Totals for an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub exported: usize,
    pub skipped: usize,
    pub failed: usize,
    pub attachments: usize,
    pub warnings: usize,
    pub dry_run: bool,
    pub notes: Vec<ExportedNote>,
}

impl ExportSummary {
    fn record(&mut self, note: &AppleNote, outcome: &NoteOutcome) {
        match outcome {
            NoteOutcome::Exported {
                path,
                attachments,
                warnings,
                decode_error,
            } => {
                self.exported += 1;
                self.attachments += attachments.len();
                self.warnings += warnings;
                self.notes.push(ExportedNote {
                    title: note.title.clone(),
                    path: path.clone(),
                    attachments: attachments.clone(),
                    warnings: *warnings,
                    decode_error: *decode_error,
                });
            }
            NoteOutcome::Skipped => self.skipped += 1,
            NoteOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Drives an export into one output directory.
///
/// Owns the two filename registries of the run (attachments and note
/// files), so names are unique within the run and a fresh session always
/// produces the same names for the same input.
pub struct ExportSession<'s, S: AttachmentSource + ?Sized> {
    source: &'s S,
    options: ExportOptions,
    attachments: AttachmentDir,
    note_files: FilenameRegistry,
}

impl<'s, S: AttachmentSource + ?Sized> ExportSession<'s, S> {
    pub fn new(source: &'s S, options: ExportOptions) -> Self {
        let attachments = AttachmentDir::new(&options.output_dir, &options.attachments_dir)
            .dry_run(options.dry_run);
        Self {
            source,
            options,
            attachments,
            note_files: FilenameRegistry::new(""),
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Exports `notes` in order, applying the folder and count filters.
    ///
    /// Per-note failures are reported and counted, never returned.
    ///
    /// # Errors
    ///
    /// Returns `FsError` only if the output directory cannot be created.
    pub fn run<P: ProgressReporter>(
        mut self,
        notes: &[AppleNote],
        progress: &mut P,
    ) -> Result<ExportSummary, FsError> {
        if !self.options.dry_run {
            ensure_dir(&self.options.output_dir)?;
        }

        let mut summary = ExportSummary {
            dry_run: self.options.dry_run,
            ..ExportSummary::default()
        };
        let limit = self.options.max_notes.unwrap_or(usize::MAX);
        let mut attempted = 0usize;

        for note in notes {
            if attempted >= limit {
                break;
            }
            let outcome = match self.options.folder.as_deref() {
                Some(folder) if !note.in_folder(folder) => NoteOutcome::Skipped,
                _ => {
                    attempted += 1;
                    self.export_note(note)
                }
            };
            summary.record(note, &outcome);
            progress.on_note(note, &outcome);
        }

        info!(
            "exported {} notes ({} failed, {} attachments)",
            summary.exported, summary.failed, summary.attachments
        );
        progress.on_complete(&summary);
        Ok(summary)
    }

    /// Decodes and writes one note.
    pub fn export_note(&mut self, note: &AppleNote) -> NoteOutcome {
        debug!("exporting note {} ({})", note.id, note.title);

        let (body, attachments, warnings, decode_error) = match note.body.as_deref() {
            Some(blob) => {
                let decoded =
                    decode_note(blob, self.source, &mut self.attachments, &self.options.decode);
                match decoded {
                    Ok(decoded) => (
                        decoded.text,
                        decoded.attachments_written,
                        decoded.warnings.len(),
                        None,
                    ),
                    Err(DecodeError::Decompression(err)) => {
                        warn!("skipping note {} ({}): {err}", note.id, note.title);
                        return NoteOutcome::Failed(err.to_string());
                    }
                    Err(DecodeError::Schema(err)) => {
                        warn!("note {} ({}) has no readable body: {err}", note.id, note.title);
                        (String::new(), Vec::new(), 0, Some(err.to_string()))
                    }
                }
            }
            None => {
                let snippet = note.snippet.as_deref().unwrap_or_default();
                (remove_artifacts(snippet), Vec::new(), 0, None)
            }
        };

        let body = if self.options.tidy {
            tidy(&body, self.options.normalize_punctuation)
        } else {
            body
        };

        let has_decode_error = decode_error.is_some();
        let content = render_markdown(note, &body, decode_error);
        let path = self.note_files.register(&note_filename(&note.title));

        if !self.options.dry_run {
            let full_path = self.options.output_dir.join(&path);
            if let Err(err) = write_atomic(&full_path, content.as_bytes()) {
                warn!("could not write note {} ({}): {err}", note.id, note.title);
                return NoteOutcome::Failed(err.to_string());
            }
        }

        NoteOutcome::Exported {
            path,
            attachments,
            warnings,
            decode_error: has_decode_error,
        }
    }
}

//! Handler for the `decode` command.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::open_store;
use crate::cli::DecodeArgs;
use crate::cli::config::Config;
use crate::decode::{AttachmentSink, DecodeOptions, decode_note};
use crate::infra::{AttachmentDir, FilenameRegistry};
use crate::store::{AttachmentSource, MemoryAttachments};

/// Handle the `decode` command.
///
/// Attachments resolve against a database only when one is named with
/// `--db` or in the config file; otherwise they all fall back to tokens.
/// Files are written only with `-o`.
pub fn handle_decode(args: &DecodeArgs, config: &Config, db: Option<&PathBuf>) -> Result<()> {
    let blob = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let source: Box<dyn AttachmentSource> = match db.or(config.database.as_ref()) {
        Some(path) => Box::new(open_store(Some(path), config)?),
        None => Box::new(MemoryAttachments::new()),
    };

    let attachments_dir = config.attachments_dir(None);
    let mut sink: Box<dyn AttachmentSink> = match &args.output {
        Some(output) => Box::new(AttachmentDir::new(output, &attachments_dir)),
        None => Box::new(FilenameRegistry::new(attachments_dir)),
    };

    let options = DecodeOptions {
        length_unit: config.length_unit(args.units.selected()),
        lookup_attempts: config.lookup_attempts(),
    };
    let decoded = decode_note(&blob, &*source, &mut *sink, &options)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    println!("{}", decoded.text);
    for attachment in &decoded.attachments_written {
        log::info!(
            "attachment {} ({})",
            attachment.relative_path,
            attachment.media_class
        );
    }
    Ok(())
}

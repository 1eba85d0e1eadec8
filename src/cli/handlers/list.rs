//! List command handler.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{open_store, truncate_str};
use crate::cli::ListArgs;
use crate::cli::config::Config;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::AppleNote;
use crate::infra::format_timestamp;

pub fn handle_list(args: &ListArgs, config: &Config, db: Option<&PathBuf>) -> Result<()> {
    let store = open_store(db, config)?;
    let notes = store.list_notes().context("failed to list notes")?;
    let notes = select_notes(notes, args.folder.as_deref(), args.max_notes);

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
                return Ok(());
            }

            println!("{:<6}  {:<40}  {:<16}  {:>10}", "ID", "Title", "Folder", "Modified");
            println!(
                "{:<6}  {:<40}  {:<16}  {:>10}",
                "------",
                "----------------------------------------",
                "----------------",
                "----------"
            );
            for note in &notes {
                let title = truncate_str(&note.title, 40);
                let folder = truncate_str(note.folder.as_deref().unwrap_or("-"), 16);
                let modified = note
                    .modified
                    .map(|m| m.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<6}  {:<40}  {:<16}  {:>10}", note.id, title, folder, modified);
            }
            println!();
            println!("{} note(s)", notes.len());
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes
                .into_iter()
                .map(|n| NoteListing {
                    id: n.id,
                    identifier: n.identifier,
                    title: n.title,
                    folder: n.folder,
                    modified: n.modified.map(format_timestamp),
                    has_body: n.body.is_some(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }

    Ok(())
}

/// Applies the folder filter, then the count limit.
pub(crate) fn select_notes(
    notes: Vec<AppleNote>,
    folder: Option<&str>,
    max_notes: Option<usize>,
) -> Vec<AppleNote> {
    notes
        .into_iter()
        .filter(|n| folder.is_none_or(|f| n.in_folder(f)))
        .take(max_notes.unwrap_or(usize::MAX))
        .collect()
}

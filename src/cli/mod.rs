//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::decode::LengthUnit;

use output::OutputFormat;

/// noteport - export Apple Notes to markdown with attachments
#[derive(Parser, Debug)]
#[command(name = "noteport", version, about, long_about = None)]
pub struct Cli {
    /// Path to NoteStore.sqlite (overrides config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List notes in the Apple Notes database
    List(ListArgs),

    /// Export notes to markdown files
    Export(ExportArgs),

    /// Decode a single raw note blob to markdown
    Decode(DecodeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `list` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Maximum number of notes to show
    #[arg(short = 'n', long)]
    pub max_notes: Option<usize>,

    /// Only show notes in this folder
    #[arg(long)]
    pub folder: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output directory (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Attachment directory name inside the output directory
    #[arg(long)]
    pub attachments_dir: Option<String>,

    /// Decode everything but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Maximum number of notes to export
    #[arg(short = 'n', long)]
    pub max_notes: Option<usize>,

    /// Only export notes in this folder
    #[arg(long)]
    pub folder: Option<String>,

    #[command(flatten)]
    pub units: LengthUnitFlags,

    /// Output format for the summary
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `decode` command
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// File holding the raw (optionally gzipped) note blob
    pub file: PathBuf,

    /// Directory to write attachments into (requires --db to resolve them)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub units: LengthUnitFlags,
}

/// Overrides for the unit attribute run lengths are counted in
#[derive(Args, Debug, Default)]
pub struct LengthUnitFlags {
    /// Count attribute run lengths in UTF-16 code units, as Apple Notes does
    #[arg(long, conflicts_with = "scalar")]
    pub utf16: bool,

    /// Count attribute run lengths in Unicode scalar values
    #[arg(long)]
    pub scalar: bool,
}

impl LengthUnitFlags {
    /// The unit chosen on the command line, if any.
    pub fn selected(&self) -> Option<LengthUnit> {
        if self.scalar {
            Some(LengthUnit::Scalar)
        } else if self.utf16 {
            Some(LengthUnit::Utf16)
        } else {
            None
        }
    }
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}

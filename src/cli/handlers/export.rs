//! Handler for the `export` command.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{ConsoleReporter, open_store};
use crate::cli::ExportArgs;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::decode::DecodeOptions;
use crate::export::{ExportOptions, ExportSession, NoopReporter};

/// Handle the `export` command.
pub fn handle_export(
    args: &ExportArgs,
    config: &Config,
    db: Option<&PathBuf>,
    verbose: bool,
) -> Result<()> {
    let store = open_store(db, config)?;
    let notes = store.list_notes().context("failed to list notes")?;
    let options = export_options(args, config);
    let output_dir = options.output_dir.clone();

    let session = ExportSession::new(&store, options);
    let summary = match args.format {
        OutputFormat::Human => session.run(&notes, &mut ConsoleReporter::new(verbose)),
        OutputFormat::Json => session.run(&notes, &mut NoopReporter),
    }
    .with_context(|| format!("failed to export to {}", output_dir.display()))?;

    if let OutputFormat::Json = args.format {
        println!("{}", serde_json::to_string_pretty(&Output::new(&summary))?);
    }

    Ok(())
}

/// Builds export options from flags, falling back to the config file.
pub(crate) fn export_options(args: &ExportArgs, config: &Config) -> ExportOptions {
    let mut options = ExportOptions::new(config.output_dir(args.output.as_ref()));
    options.attachments_dir = config.attachments_dir(args.attachments_dir.as_deref());
    options.decode = DecodeOptions {
        length_unit: config.length_unit(args.units.selected()),
        lookup_attempts: config.lookup_attempts(),
    };
    options.normalize_punctuation = config.normalize_punctuation;
    options.dry_run = args.dry_run;
    options.max_notes = args.max_notes;
    options.folder = args.folder.clone();
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use crate::decode::LengthUnit;
    use clap::Parser;

    fn parse(argv: &[&str]) -> ExportArgs {
        match Cli::parse_from(argv).command {
            Command::Export(args) => args,
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn flags_override_config() {
        let config = Config {
            output: Some(PathBuf::from("/config/out")),
            attachments_dir: Some("media".into()),
            lookup_attempts: Some(4),
            normalize_punctuation: true,
            ..Config::default()
        };
        let args = parse(&[
            "noteport",
            "export",
            "-o",
            "/cli/out",
            "--attachments-dir",
            "files",
            "--scalar",
            "--dry-run",
        ]);

        let options = export_options(&args, &config);
        assert_eq!(options.output_dir, PathBuf::from("/cli/out"));
        assert_eq!(options.attachments_dir, "files");
        assert_eq!(options.decode.length_unit, LengthUnit::Scalar);
        assert_eq!(options.decode.lookup_attempts, 4);
        assert!(options.normalize_punctuation);
        assert!(options.dry_run);
    }

    #[test]
    fn config_fills_in_missing_flags() {
        let config = Config {
            output: Some(PathBuf::from("/config/out")),
            ..Config::default()
        };
        let options = export_options(&parse(&["noteport", "export"]), &config);
        assert_eq!(options.output_dir, PathBuf::from("/config/out"));
        assert_eq!(options.attachments_dir, "attachments");
        assert_eq!(options.decode.length_unit, LengthUnit::Utf16);
        assert!(!options.dry_run);
    }
}

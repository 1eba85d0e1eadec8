//! noteport - export Apple Notes to markdown with attachments

pub mod cli;
pub mod decode;
pub mod domain;
pub mod export;
pub mod infra;
pub mod store;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_decode, handle_export, handle_list},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let db = cli.db.as_ref();
    let verbose = cli.verbose > 0;

    match &cli.command {
        Command::List(args) => handle_list(args, &config, db),
        Command::Export(args) => handle_export(args, &config, db, verbose),
        Command::Decode(args) => handle_decode(args, &config, db),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Sets up `env_logger`: warnings by default, more with each `-v`.
///
/// `RUST_LOG` takes precedence over the flag.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A logger may already be installed when embedded; keep it.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

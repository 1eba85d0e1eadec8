//! Configuration file support.

use crate::decode::{DEFAULT_LOOKUP_ATTEMPTS, LengthUnit};
use crate::export::DEFAULT_ATTACHMENTS_DIR;
use crate::store::{DEFAULT_BUSY_TIMEOUT, NoteStore};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to NoteStore.sqlite
    pub database: Option<PathBuf>,

    /// Default export directory
    pub output: Option<PathBuf>,

    /// Attachment directory name inside the export directory
    pub attachments_dir: Option<String>,

    /// Unit attribute run lengths are counted in
    pub length_unit: Option<LengthUnit>,

    /// Turn smart quotes and dashes into ASCII when exporting
    #[serde(default)]
    pub normalize_punctuation: bool,

    /// Attempts per attachment lookup
    pub lookup_attempts: Option<u32>,

    /// How long to wait on a locked database, in milliseconds
    pub busy_timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/noteport/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("noteport")
            .join("config.toml")
    }

    /// Resolve the database path, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. Config file `database` setting
    /// 3. The standard macOS location
    pub fn database(&self, cli_db: Option<&PathBuf>) -> Option<PathBuf> {
        cli_db
            .cloned()
            .or_else(|| self.database.clone())
            .or_else(NoteStore::default_path)
    }

    /// Resolve the export directory, with CLI argument taking precedence.
    ///
    /// Falls back to `./notes`.
    pub fn output_dir(&self, cli_output: Option<&PathBuf>) -> PathBuf {
        cli_output
            .cloned()
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from("notes"))
    }

    /// Resolve the attachment directory name.
    pub fn attachments_dir(&self, cli_dir: Option<&str>) -> String {
        cli_dir
            .or(self.attachments_dir.as_deref())
            .unwrap_or(DEFAULT_ATTACHMENTS_DIR)
            .to_string()
    }

    /// Resolve the length unit, with a CLI flag taking precedence.
    ///
    /// Falls back to UTF-16 code units, which is how NoteStore bodies count.
    pub fn length_unit(&self, cli_unit: Option<LengthUnit>) -> LengthUnit {
        cli_unit
            .or(self.length_unit)
            .unwrap_or(LengthUnit::Utf16)
    }

    pub fn lookup_attempts(&self) -> u32 {
        self.lookup_attempts.unwrap_or(DEFAULT_LOOKUP_ATTEMPTS).max(1)
    }

    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_BUSY_TIMEOUT)
    }
}

//! File output with atomic writes.

use crate::decode::AttachmentSink;
use crate::domain::FileReference;
use crate::infra::dedup::{FilenameRegistry, attachment_candidate};
use log::trace;
use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors during file system operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    pub(crate) fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Creates `dir` and its parents if needed.
///
/// # Errors
///
/// Returns `FsError::NotADirectory` if something other than a directory is
/// already at `dir`.
pub fn ensure_dir(dir: &Path) -> Result<(), FsError> {
    if dir.exists() && !dir.is_dir() {
        return Err(FsError::NotADirectory { path: dir.into() });
    }
    fs::create_dir_all(dir).map_err(|e| FsError::from_io(dir, e))
}

/// Writes `contents` to `path` atomically.
///
/// Uses a temporary file in the same directory and an atomic rename, so a
/// crash never leaves a partial file. Missing parent directories are
/// created.
///
/// # Errors
///
/// Returns `FsError::AtomicWrite` if the rename fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FsError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(path, e))?;
    temp.write_all(contents)
        .map_err(|e| FsError::from_io(path, e))?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}

/// Attachment sink writing into a directory below an output root.
///
/// Relative paths returned by [`AttachmentSink::persist`] are relative to
/// the root, which is where the notes themselves are written.
#[derive(Debug)]
pub struct AttachmentDir {
    root: PathBuf,
    registry: FilenameRegistry,
    dry_run: bool,
    written: usize,
}

impl AttachmentDir {
    /// Creates a sink for `<root>/<directory>` with an empty registry.
    pub fn new(root: impl Into<PathBuf>, directory: &str) -> Self {
        Self {
            root: root.into(),
            registry: FilenameRegistry::new(directory),
            dry_run: false,
            written: 0,
        }
    }

    /// Assigns names without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of attachments persisted so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl AttachmentSink for AttachmentDir {
    fn persist(&mut self, file: &FileReference) -> Result<String, FsError> {
        let relative = self.registry.register(&attachment_candidate(file));
        if !self.dry_run {
            let path = self.root.join(&relative);
            write_atomic(&path, &file.data)?;
            trace!("wrote {} bytes to {}", file.byte_len(), path.display());
        }
        self.written += 1;
        Ok(relative)
    }
}

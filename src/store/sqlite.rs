//! Read-only access to an Apple Notes `NoteStore.sqlite` database.

use super::{AttachmentSource, BinaryAttachment, StoreError, StoreResult};
use crate::domain::{AppleNote, from_apple_timestamp, type_tag};
use log::{debug, trace};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

/// Default busy timeout for lookups while Notes holds a lock.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

const LIST_NOTES: &str = "
    SELECT
        n.Z_PK,
        n.ZIDENTIFIER,
        n.ZTITLE1,
        n.ZSNIPPET,
        n.ZCREATIONDATE1,
        n.ZMODIFICATIONDATE1,
        f.ZTITLE2,
        c.ZDATA
    FROM ZICCLOUDSYNCINGOBJECT n
    LEFT JOIN ZICCLOUDSYNCINGOBJECT f ON n.ZFOLDER = f.Z_PK
    LEFT JOIN ZICNOTEDATA c ON n.ZNOTEDATA = c.Z_PK
    WHERE n.ZTITLE1 IS NOT NULL
        AND COALESCE(n.ZMARKEDFORDELETION, 0) = 0
    ORDER BY n.ZMODIFICATIONDATE1 DESC, n.Z_PK";

const INLINE_ALT_TEXT: &str = "
    SELECT ZALTTEXT FROM ZICCLOUDSYNCINGOBJECT WHERE ZIDENTIFIER = ?1";

const ATTACHMENT_MEDIA: &str = "
    SELECT a.ZTYPEUTI, m.ZIDENTIFIER, m.ZFILENAME
    FROM ZICCLOUDSYNCINGOBJECT a
    LEFT JOIN ZICCLOUDSYNCINGOBJECT m ON a.ZMEDIA = m.Z_PK
    WHERE a.ZIDENTIFIER = ?1";

/// An open Apple Notes database.
///
/// Attachment files live next to the database, under
/// `Accounts/<account>/Media/<media id>/`.
#[derive(Debug)]
pub struct NoteStore {
    conn: Connection,
    container: PathBuf,
}

impl NoteStore {
    /// Location of the database on a standard macOS install.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join("Library/Group Containers/group.com.apple.notes/NoteStore.sqlite")
        })
    }

    /// Opens the database read-only with the default busy timeout.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Opens the database read-only.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DatabaseNotFound` if nothing exists at `path`.
    pub fn open_with_timeout(path: &Path, busy_timeout: Duration) -> StoreResult<Self> {
        if !path.is_file() {
            return Err(StoreError::DatabaseNotFound { path: path.into() });
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;
        conn.busy_timeout(busy_timeout)?;

        let container = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        debug!("opened note store {} (read-only)", path.display());
        Ok(Self { conn, container })
    }

    /// Directory holding the database and its attachment files.
    pub fn container(&self) -> &Path {
        &self.container
    }

    /// Lists titled, non-deleted notes, most recently modified first.
    pub fn list_notes(&self) -> StoreResult<Vec<AppleNote>> {
        let mut stmt = self.conn.prepare(LIST_NOTES)?;
        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!("listed {} notes", notes.len());
        Ok(notes)
    }

    /// Finds the file of a media object, preferring one named `filename`.
    fn find_media_file(&self, media_id: &str, filename: Option<&str>) -> Option<PathBuf> {
        if !is_single_component(media_id) {
            debug!("ignoring media id {media_id:?}: not a plain directory name");
            return None;
        }
        let accounts = self.container.join("Accounts");
        let entries = fs::read_dir(&accounts).ok()?;

        let mut account_dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path().join("Media").join(media_id))
            .filter(|p| p.is_dir())
            .collect();
        account_dirs.sort();

        let mut fallback = None;
        for dir in account_dirs {
            for entry in WalkDir::new(&dir)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                if filename.is_some_and(|name| entry.file_name().to_str() == Some(name)) {
                    return Some(entry.into_path());
                }
                fallback.get_or_insert_with(|| entry.into_path());
            }
        }
        fallback
    }
}

/// Whether `name` names exactly one entry below its parent directory.
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !name.contains(['/', '\\'])
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<AppleNote> {
    let title: String = row.get(2)?;
    let mut note = AppleNote::new(row.get(0)?, title);
    note.identifier = row.get(1)?;
    note.snippet = row.get(3)?;
    note.created = row.get::<_, Option<f64>>(4)?.and_then(from_apple_timestamp);
    note.modified = row.get::<_, Option<f64>>(5)?.and_then(from_apple_timestamp);
    note.folder = row.get(6)?;
    note.body = row.get(7)?;
    Ok(note)
}

impl AttachmentSource for NoteStore {
    fn resolve_inline(&self, attachment_id: &str) -> StoreResult<Option<String>> {
        let alt_text: Option<Option<String>> = self
            .conn
            .query_row(INLINE_ALT_TEXT, [attachment_id], |row| row.get(0))
            .optional()?;
        Ok(alt_text.flatten())
    }

    fn fetch_binary(&self, attachment_id: &str) -> StoreResult<Option<BinaryAttachment>> {
        let row = self
            .conn
            .query_row(ATTACHMENT_MEDIA, [attachment_id], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })
            .optional()?;

        let Some((type_uti, Some(media_id), filename)) = row else {
            trace!("attachment {attachment_id} has no media row");
            return Ok(None);
        };

        let Some(path) = self.find_media_file(&media_id, filename.as_deref()) else {
            debug!("no file on disk for media {media_id}");
            return Ok(None);
        };

        let bytes = fs::read(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let filename = filename.or_else(|| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
        });

        Ok(Some(BinaryAttachment {
            filename,
            bytes,
            media_class: type_tag::media_class(type_uti.as_deref()),
        }))
    }
}

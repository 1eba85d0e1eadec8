//! Isolated test environment with a temporary Notes container.

// Allow dead code since this is a test utility shared by several test binaries
#![allow(dead_code)]

use super::{NoteportCommand, TestNote};
use noteport::store::NoteStore;
use rusqlite::{Connection, OptionalExtension, params};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCHEMA: &str = "
    CREATE TABLE ZICCLOUDSYNCINGOBJECT (
        Z_PK INTEGER PRIMARY KEY,
        ZIDENTIFIER TEXT,
        ZTITLE1 TEXT,
        ZTITLE2 TEXT,
        ZSNIPPET TEXT,
        ZCREATIONDATE1 REAL,
        ZMODIFICATIONDATE1 REAL,
        ZFOLDER INTEGER,
        ZNOTEDATA INTEGER,
        ZMARKEDFORDELETION INTEGER,
        ZALTTEXT TEXT,
        ZTYPEUTI TEXT,
        ZMEDIA INTEGER,
        ZFILENAME TEXT
    );
    CREATE TABLE ZICNOTEDATA (Z_PK INTEGER PRIMARY KEY, ZDATA BLOB);";

/// Isolated Apple Notes container in a temporary directory.
///
/// Layout mirrors the real group container:
///
/// ```text
/// <tmp>/
///   NoteStore.sqlite
///   Accounts/LocalAccount/Media/<media id>/1_abc/<file>
///   home/             (HOME for spawned commands)
///   out/              (default export target)
/// ```
///
/// Everything is removed when the env is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
    conn: Connection,
    next_pk: Cell<i64>,
}

impl TestEnv {
    /// Creates a container with an empty database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        let conn = Connection::open(root.join("NoteStore.sqlite")).expect("Failed to create db");
        conn.execute_batch(SCHEMA).expect("Failed to create schema");
        std::fs::create_dir_all(root.join("home")).expect("Failed to create home");
        Self {
            _temp_dir: temp_dir,
            root,
            conn,
            next_pk: Cell::new(1),
        }
    }

    /// Returns the container root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path to the database.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("NoteStore.sqlite")
    }

    /// Returns the default export directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join("out")
    }

    /// Returns the isolated home directory used by spawned commands.
    pub fn home(&self) -> PathBuf {
        self.root.join("home")
    }

    fn allocate_pk(&self) -> i64 {
        let pk = self.next_pk.get();
        self.next_pk.set(pk + 1);
        pk
    }

    /// Returns the primary key of `name`, inserting the folder if needed.
    pub fn add_folder(&self, name: &str) -> i64 {
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT Z_PK FROM ZICCLOUDSYNCINGOBJECT WHERE ZTITLE2 = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()
            .expect("Failed to query folder");
        if let Some(pk) = existing {
            return pk;
        }

        let pk = self.allocate_pk();
        self.conn
            .execute(
                "INSERT INTO ZICCLOUDSYNCINGOBJECT (Z_PK, ZTITLE2) VALUES (?1, ?2)",
                params![pk, name],
            )
            .expect("Failed to insert folder");
        pk
    }

    /// Inserts a note and returns its primary key.
    pub fn add_note(&self, note: &TestNote) -> i64 {
        let folder = note.get_folder().map(|name| self.add_folder(name));
        let pk = self.allocate_pk();

        let data_pk = note.get_body().map(|body| {
            self.conn
                .execute(
                    "INSERT INTO ZICNOTEDATA (Z_PK, ZDATA) VALUES (?1, ?2)",
                    params![pk, body],
                )
                .expect("Failed to insert note data");
            pk
        });

        self.conn
            .execute(
                "INSERT INTO ZICCLOUDSYNCINGOBJECT
                    (Z_PK, ZIDENTIFIER, ZTITLE1, ZSNIPPET, ZCREATIONDATE1, ZMODIFICATIONDATE1,
                     ZFOLDER, ZNOTEDATA, ZMARKEDFORDELETION)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    pk,
                    format!("NOTE-{pk}"),
                    note.get_title(),
                    note.get_snippet(),
                    note.get_created(),
                    note.get_modified(),
                    folder,
                    data_pk,
                    i64::from(note.is_deleted()),
                ],
            )
            .expect("Failed to insert note");
        pk
    }

    /// Registers an inline attachment (hashtag, mention, link, ...).
    pub fn add_inline_attachment(&self, id: &str, type_uti: &str, alt_text: Option<&str>) {
        let pk = self.allocate_pk();
        self.conn
            .execute(
                "INSERT INTO ZICCLOUDSYNCINGOBJECT (Z_PK, ZIDENTIFIER, ZTYPEUTI, ZALTTEXT)
                 VALUES (?1, ?2, ?3, ?4)",
                params![pk, id, type_uti, alt_text],
            )
            .expect("Failed to insert inline attachment");
    }

    /// Registers a file attachment and writes its bytes into the media tree.
    pub fn add_file_attachment(&self, id: &str, type_uti: &str, filename: &str, bytes: &[u8]) {
        let media_pk = self.allocate_pk();
        let media_id = format!("MEDIA-{media_pk}");
        self.conn
            .execute(
                "INSERT INTO ZICCLOUDSYNCINGOBJECT (Z_PK, ZIDENTIFIER, ZFILENAME)
                 VALUES (?1, ?2, ?3)",
                params![media_pk, media_id, filename],
            )
            .expect("Failed to insert media");

        let pk = self.allocate_pk();
        self.conn
            .execute(
                "INSERT INTO ZICCLOUDSYNCINGOBJECT (Z_PK, ZIDENTIFIER, ZTYPEUTI, ZMEDIA)
                 VALUES (?1, ?2, ?3, ?4)",
                params![pk, id, type_uti, media_pk],
            )
            .expect("Failed to insert attachment");

        let dir = self
            .root
            .join("Accounts/LocalAccount/Media")
            .join(&media_id)
            .join("1_abc");
        std::fs::create_dir_all(&dir).expect("Failed to create media dir");
        std::fs::write(dir.join(filename), bytes).expect("Failed to write media file");
    }

    /// Opens the database through the library.
    pub fn store(&self) -> NoteStore {
        NoteStore::open(&self.db_path()).expect("Failed to open note store")
    }

    /// Creates a NoteportCommand bound to this container.
    pub fn cmd(&self) -> NoteportCommand {
        NoteportCommand::new().db(&self.db_path()).home(&self.home())
    }

    /// Writes a file into the environment and returns its path.
    pub fn write_file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes the config file where spawned commands look for it.
    ///
    /// Covers both the XDG location and the macOS one under the isolated home.
    pub fn write_config(&self, contents: &str) {
        for dir in [".config", "Library/Application Support"] {
            self.write_file(&format!("home/{dir}/noteport/config.toml"), contents);
        }
    }

    /// Reads a file below the export directory.
    pub fn read_output(&self, relative: &str) -> String {
        let path = self.output_dir().join(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

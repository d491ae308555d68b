use std::fs;
use std::path::Path;

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::entity::{self, timestamp, Note, NoteInput};
use crate::error::{NotekeeperError, Result};

const NOTE_COLUMNS: &str = "id, title, description, created_at, updated_at";

/// SQLite-backed owner of all persisted notes.
///
/// The store assigns ids and timestamps; callers only ever hand it a
/// `NoteInput`.
pub struct NoteStore {
    conn: Connection,
}

impl NoteStore {
    /// Open or create the notes database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;

        let store = Self { conn };
        store.init_schema()?;
        tracing::debug!(path = %path.display(), "opened note store");
        Ok(store)
    }

    /// Open a store that lives only as long as this value
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        // AUTOINCREMENT keeps ids of deleted notes from being handed out again
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// All notes in primary key order
    pub fn list(&self) -> Result<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY id"))?;

        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn get(&self, id: i64) -> Result<Note> {
        find(&self.conn, id)?.ok_or(NotekeeperError::NotFound(id))
    }

    /// Validate and insert a new note, returning it as stored
    pub fn create(&self, input: &NoteInput) -> Result<Note> {
        let fields = input.validate().map_err(NotekeeperError::InvalidInput)?;
        let now = entity::now();
        let stamp = timestamp::format(&now);

        self.conn.execute(
            "INSERT INTO notes (title, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![fields.title, fields.description, stamp, stamp],
        )?;

        Ok(Note {
            id: self.conn.last_insert_rowid(),
            title: fields.title,
            description: fields.description,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace title and description of an existing note.
    ///
    /// The lookup, validation and write run in one transaction. An unknown id
    /// is reported before the payload is looked at.
    pub fn update(&mut self, id: i64, input: &NoteInput) -> Result<Note> {
        let tx = self.conn.transaction()?;

        let current = find(&tx, id)?.ok_or(NotekeeperError::NotFound(id))?;
        let fields = input.validate().map_err(NotekeeperError::InvalidInput)?;
        // never move updated_at backwards, even if the clock does
        let updated_at = entity::now().max(current.updated_at);

        let changed = tx.execute(
            "UPDATE notes SET title = ?1, description = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                fields.title,
                fields.description,
                timestamp::format(&updated_at),
                id
            ],
        )?;
        if changed == 0 {
            return Err(NotekeeperError::NotFound(id));
        }
        tx.commit()?;

        Ok(Note {
            title: fields.title,
            description: fields.description,
            updated_at,
            ..current
        })
    }

    /// Permanently remove a note
    pub fn delete(&self, id: i64) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", [id])?;
        if removed == 0 {
            return Err(NotekeeperError::NotFound(id));
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn find(conn: &Connection, id: i64) -> Result<Option<Note>> {
    let note = conn
        .query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
            [id],
            note_from_row,
        )
        .optional()?;
    Ok(note)
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        created_at: timestamp_column(row, 3)?,
        updated_at: timestamp_column(row, 4)?,
    })
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    let raw: String = row.get(idx)?;
    timestamp::parse(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl From<rusqlite::Error> for NotekeeperError {
    fn from(e: rusqlite::Error) -> Self {
        NotekeeperError::Storage(format!("SQLite error: {}", e))
    }
}

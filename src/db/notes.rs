use anyhow::Result;
use rusqlite::{params, Connection, Row};

use super::{invalid_column, Database};
use crate::book::NoteBook;
use crate::models::Note;

impl Database {
    pub fn load_note_book(&self) -> Result<NoteBook> {
        let mut stmt = self
            .conn
            .prepare("SELECT text, tags, title FROM notes ORDER BY id")?;
        let notes = stmt
            .query_map([], Self::row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::info!(notes = notes.len(), "note book loaded");
        Ok(NoteBook::from_notes(notes))
    }

    /// Replace the stored notes with `book`, in one transaction.
    pub fn save_note_book(&self, book: &NoteBook) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        Self::write_notes(&tx, book)?;
        tx.commit()?;
        tracing::info!(notes = book.len(), "note book saved");
        Ok(())
    }

    pub(super) fn write_notes(conn: &Connection, book: &NoteBook) -> Result<()> {
        conn.execute("DELETE FROM notes", [])?;

        {
            let mut insert =
                conn.prepare("INSERT INTO notes (id, text, tags, title) VALUES (?, ?, ?, ?)")?;
            for (id, note) in (1i64..).zip(book.iter()) {
                let tags = serde_json::to_string(note.tags())?;
                insert.execute(params![id, note.text(), tags, note.title()])?;
            }
        }
        Ok(())
    }

    fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
        let text: String = row.get(0)?;
        let tags_json: String = row.get(1)?;
        let title: Option<String> = row.get(2)?;

        let tags: Vec<String> =
            serde_json::from_str(&tags_json).map_err(|e| invalid_column(1, e))?;

        Ok(Note::new(text, tags, title))
    }
}

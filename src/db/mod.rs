use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::book::{AddressBook, NoteBook};

mod contacts;
mod notes;
mod schema;

pub use schema::SCHEMA_VERSION;

/// Snapshot storage for the address book and the note book.
///
/// Each book is loaded and saved as a whole; the two snapshots are
/// independent of each other.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database, creating if needed, running migrations
    pub fn open_at(path: &Path) -> Result<Self> {
        // Create parent directories
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening data file {}", path.display()))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        tracing::debug!(path = %path.display(), "data file opened");

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Replace both snapshots in one transaction: either both are saved or
    /// neither is.
    pub fn save_all(&self, book: &AddressBook, notes: &NoteBook) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        Self::write_contacts(&tx, book)?;
        Self::write_notes(&tx, notes)?;
        tx.commit()?;
        tracing::info!(contacts = book.len(), notes = notes.len(), "snapshots saved");
        Ok(())
    }

    fn migrate(&self) -> Result<()> {
        let version = self.get_schema_version()?;

        if version == 0 {
            // Run migration in a transaction for atomicity
            self.conn
                .execute_batch(&format!("BEGIN TRANSACTION; {} COMMIT;", schema::SCHEMA_V1))?;
            self.set_schema_version(1)?;
            tracing::info!(version = SCHEMA_VERSION, "schema created");
        } else if version > SCHEMA_VERSION {
            anyhow::bail!(
                "data file schema v{} is newer than this build supports (v{})",
                version,
                SCHEMA_VERSION
            );
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<i32> {
        let result: Result<i32, _> =
            self.conn
                .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                    row.get(0)
                });

        match result {
            Ok(v) => Ok(v),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(rusqlite::Error::SqliteFailure(err, msg)) => {
                // "no such table" is error code 1 (SQLITE_ERROR)
                if err.code == rusqlite::ErrorCode::Unknown
                    && msg.as_ref().map_or(false, |m| m.contains("no such table"))
                {
                    Ok(0)
                } else {
                    Err(rusqlite::Error::SqliteFailure(err, msg).into())
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set_schema_version(&self, version: i32) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?)",
            [version],
        )?;
        Ok(())
    }
}

/// Map a field validation failure on a stored value to a row error.
fn invalid_column<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

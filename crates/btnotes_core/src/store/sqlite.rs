//! SQLite-backed session store.
//!
//! # Responsibility
//! - Keep one session's key-value entries in a single SQLite file so the
//!   session survives across CLI invocations.
//!
//! # Invariants
//! - `set` has overwrite semantics (upsert by key).
//! - The connection is fully migrated before any read or write.

use super::{SessionStore, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub struct SqliteSessionStore {
    conn: Connection,
}

impl SqliteSessionStore {
    /// Opens (or creates) the session file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a throwaway session that disappears when dropped.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Returns stored keys in ascending order.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM session_entries ORDER BY key ASC;")?;
        let mut rows = stmt.query([])?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(row.get(0)?);
        }
        Ok(keys)
    }

    /// Drops every entry, ending the session.
    pub fn clear(&mut self) -> StoreResult<()> {
        let removed = self.conn.execute("DELETE FROM session_entries;", [])?;
        info!("event=session_clear module=store status=ok removed={removed}");
        Ok(())
    }
}

impl SessionStore for SqliteSessionStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM session_entries WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO session_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM session_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

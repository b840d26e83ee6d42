//! Session store abstraction and JSON persistence helpers.
//!
//! # Responsibility
//! - Define the string-keyed, string-valued store every session uses.
//! - Encode and decode the persisted collections as JSON.
//!
//! # Invariants
//! - `save_json` overwrites unconditionally; there is no partial write.
//! - `load_json` never fails: absent or malformed values yield the fallback.

use crate::db::DbError;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemorySessionStore;
pub use sqlite::SqliteSessionStore;

/// Key holding the placeholder auth token.
pub const AUTH_KEY: &str = "btnotes_token";
/// Key holding the JSON task list.
pub const TASKS_KEY: &str = "btnotes_tasks";
/// Key holding the JSON project list.
pub const PROJECTS_KEY: &str = "btnotes_projects";
/// Key holding the JSON team list.
pub const TEAM_KEY: &str = "btnotes_team";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "session store failure: {err}"),
            Self::Encode(err) => write!(f, "failed to encode session value: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Key-value store scoped to one session.
pub trait SessionStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Reads and decodes a JSON value, returning `fallback` when the key is
/// absent, empty, unreadable or malformed.
pub fn load_json<T, S>(store: &S, key: &str, fallback: T) -> T
where
    T: DeserializeOwned,
    S: SessionStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => {
            debug!("event=store_load module=store status=fallback key={key} reason=absent");
            return fallback;
        }
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback key={key} reason=read_failed error={err}"
            );
            return fallback;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback key={key} reason=malformed line={} column={}",
                err.line(),
                err.column()
            );
            fallback
        }
    }
}

/// Encodes `value` as JSON and overwrites `key`.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: SessionStore + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded)
}

#[cfg(test)]
mod tests {
    use super::{load_json, save_json, MemorySessionStore, SessionStore};

    #[test]
    fn load_json_returns_fallback_for_absent_empty_and_malformed_values() {
        let mut store = MemorySessionStore::new();
        assert_eq!(load_json(&store, "numbers", vec![7_u32]), vec![7]);

        store.set("numbers", "").expect("set empty");
        assert_eq!(load_json(&store, "numbers", vec![7_u32]), vec![7]);

        store.set("numbers", "[1, 2,").expect("set malformed");
        assert_eq!(load_json(&store, "numbers", vec![7_u32]), vec![7]);

        store.set("numbers", r#"{"not":"a list"}"#).expect("set wrong shape");
        assert_eq!(load_json(&store, "numbers", vec![7_u32]), vec![7]);
    }

    #[test]
    fn save_then_load_returns_saved_value() {
        let mut store = MemorySessionStore::new();
        save_json(&mut store, "numbers", &vec![1_u32, 2, 3]).expect("save");
        assert_eq!(
            store.get("numbers").expect("get").as_deref(),
            Some("[1,2,3]")
        );
        assert_eq!(load_json(&store, "numbers", Vec::<u32>::new()), vec![1, 2, 3]);
    }
}

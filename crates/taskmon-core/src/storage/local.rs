//! SQLite-backed local key-value storage.
//!
//! Always available and synchronous. Holds:
//! - the profile document (full overwrite on every save)
//! - a pending encounter awaiting resolution, if any

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use super::repository::ProfileStore;
use crate::error::{Result, StorageError};
use crate::profile::Profile;
use crate::session::PendingEncounter;

pub const PROFILE_KEY: &str = "taskmon_profile";
pub const PENDING_KEY: &str = "pending_encounter";

pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Open the store at `<data dir>/taskmon.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(data_dir()?.join("taskmon.db"))
    }

    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    pub fn clear_profile(&self) -> Result<()> {
        self.kv_delete(PROFILE_KEY)?;
        self.kv_delete(PENDING_KEY)?;
        Ok(())
    }

    pub fn load_pending(&self) -> Result<Option<PendingEncounter>> {
        match self.kv_get(PENDING_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn save_pending(&self, pending: &PendingEncounter) -> Result<()> {
        self.kv_set(PENDING_KEY, &serde_json::to_string(pending)?)?;
        Ok(())
    }

    pub fn clear_pending(&self) -> Result<()> {
        self.kv_delete(PENDING_KEY)?;
        Ok(())
    }
}

impl ProfileStore for LocalStore {
    /// A stored document that no longer parses reads as "no profile".
    fn load(&self) -> Result<Option<Profile>> {
        let Some(json) = self.kv_get(PROFILE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                tracing::error!(error = %e, "stored profile is unreadable; ignoring it");
                Ok(None)
            }
        }
    }

    fn save(&self, profile: &Profile) -> Result<()> {
        self.kv_set(PROFILE_KEY, &serde_json::to_string(profile)?)?;
        Ok(())
    }
}

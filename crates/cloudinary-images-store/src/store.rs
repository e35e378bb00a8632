use std::path::Path;
use std::sync::Mutex;

use cloudinary_images::{OptionError, OptionStore};

use crate::schema;

/// A SQLite-backed option store.
pub struct SqliteOptionStore {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteOptionStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn =
            rusqlite::Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        tracing::debug!(path = %path.display(), "opened option store");
        Self::from_connection(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: rusqlite::Connection) -> Result<Self, StoreError> {
        schema::migrations()
            .to_latest(&mut conn)
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// All stored option names, sorted.
    pub fn names(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare("SELECT name FROM options ORDER BY name")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let names = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .collect::<rusqlite::Result<Vec<String>>>()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(names)
    }

    /// When an option was last written, as epoch seconds.
    pub fn updated_at(&self, name: &str) -> Result<Option<u64>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let result = conn.query_row(
            "SELECT updated_at FROM options WHERE name = ?1",
            [name],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(timestamp) => Ok(timestamp.parse().ok()),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Database(e.to_string())),
        }
    }
}

impl OptionStore for SqliteOptionStore {
    fn get_option(&self, name: &str) -> Result<Option<String>, OptionError> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            "SELECT value FROM options WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(OptionError::Storage(other.to_string())),
        })
    }

    fn set_option(&self, name: &str, value: &str) -> Result<(), OptionError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT OR REPLACE INTO options (name, value, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![name, value, now_epoch_secs()],
        )
        .map_err(|e| OptionError::Storage(e.to_string()))?;

        Ok(())
    }

    fn delete_option(&self, name: &str) -> Result<(), OptionError> {
        let conn = self.conn.lock().unwrap();

        conn.execute("DELETE FROM options WHERE name = ?1", [name])
            .map_err(|e| OptionError::Storage(e.to_string()))?;

        Ok(())
    }
}

/// Errors specific to opening a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),
}

fn now_epoch_secs() -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    now.to_string()
}

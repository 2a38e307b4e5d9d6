//! Key/value preference storage.
//!
//! Values are stored as text; typed decoding lives in the preference service.

use super::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Key of the snapshot the live board was last loaded from.
pub const CURRENT_SNAPSHOT_KEY: &str = "history.current_snapshot";

/// Repository interface for string preferences.
pub trait PreferenceRepository {
    fn get_preference(&self, key: &str) -> RepoResult<Option<String>>;
    /// Inserts or overwrites one preference value.
    fn set_preference(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Removes a preference; missing keys are not an error.
    fn remove_preference(&self, key: &str) -> RepoResult<()>;
}

/// SQLite-backed preference repository.
pub struct SqlitePreferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PreferenceRepository for SqlitePreferenceRepository<'_> {
    fn get_preference(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_preference(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_preference(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1;", [key])?;
        Ok(())
    }
}

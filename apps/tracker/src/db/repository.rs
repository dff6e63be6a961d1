//! Repository pattern for database access.

use crate::db::error::DbError;
use crate::db::schema::{SCHEMA, SCHEMA_VERSION};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Durable string records addressed by key.
pub trait KeyValueRepository {
    fn get_value(&self, key: &str) -> Result<Option<String>>;
    fn set_value(&self, key: &str, value: &str) -> Result<()>;
    fn delete_value(&self, key: &str) -> Result<()>;
}

/// SQLite-backed repository.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Highest schema version recorded in the database.
    pub fn schema_version(&self) -> Result<i32> {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .map_err(Into::into)
    }

    /// Last time a record was written, as stored (RFC 3339).
    pub fn updated_at(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }
}

impl KeyValueRepository for SqliteRepository {
    fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn delete_value(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_key_reads_as_none() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert_eq!(repo.get_value("studyData").unwrap(), None);
        assert_eq!(repo.updated_at("studyData").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.set_value("subjects", "[]").unwrap();
        assert_eq!(repo.get_value("subjects").unwrap().as_deref(), Some("[]"));
        assert!(repo.updated_at("subjects").unwrap().is_some());
    }

    #[test]
    fn set_replaces_whole_value() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.set_value("reviewSettings", r#"{"intervalDays":7}"#).unwrap();
        repo.set_value("reviewSettings", r#"{"intervalDays":14}"#).unwrap();
        assert_eq!(
            repo.get_value("reviewSettings").unwrap().as_deref(),
            Some(r#"{"intervalDays":14}"#)
        );
    }

    #[test]
    fn delete_removes_value() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.set_value("subjects", "[]").unwrap();
        repo.delete_value("subjects").unwrap();
        assert_eq!(repo.get_value("subjects").unwrap(), None);
        repo.delete_value("subjects").unwrap();
    }

    #[test]
    fn schema_version_is_recorded() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert_eq!(repo.schema_version().unwrap(), SCHEMA_VERSION);
    }
}

//! SQLite persistence for the patient registry.

mod errors;
mod patients;
mod schema;

pub use errors::*;
pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Errors raised while opening or initializing the database.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating file and schema if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let db = Self::open_uninitialized(path)?;
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let db = Self::open_in_memory_uninitialized()?;
        db.initialize()?;
        Ok(db)
    }

    /// Open database at path without creating the schema.
    pub fn open_uninitialized<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening patient database");
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// In-memory database with no tables.
    pub fn open_in_memory_uninitialized() -> DbResult<Self> {
        tracing::debug!("opening in-memory patient database");
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the schema. Safe to call on an initialized database.
    pub fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        tracing::debug!("patient schema initialized");
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(db: &Database) -> Vec<String> {
        db.conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    }

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();
        assert!(table_names(&db).contains(&"patients".to_string()));
    }

    #[test]
    fn test_uninitialized_has_no_tables() {
        let db = Database::open_in_memory_uninitialized().unwrap();
        assert!(!table_names(&db).contains(&"patients".to_string()));

        db.initialize().unwrap();
        assert!(table_names(&db).contains(&"patients".to_string()));
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.db");

        let db = Database::open(&path).unwrap();
        drop(db);
        assert!(path.exists());

        // Reopening an existing file keeps the schema
        let db = Database::open(&path).unwrap();
        assert!(table_names(&db).contains(&"patients".to_string()));
    }
}

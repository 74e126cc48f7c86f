//! Environment-driven configuration.
//!
//! # Environment Variables
//! - `HOSPITAL_CRUD_DATABASE_PATH`: SQLite database file (default: in-memory)
//! - `HOSPITAL_CRUD_INITIALIZE_SCHEMA`: create the schema on open
//!   (`true`/`false`/`1`/`0`, default: `true`)

use std::path::PathBuf;

use thiserror::Error;

use crate::db::{Database, DbResult};

pub const DATABASE_PATH_VAR: &str = "HOSPITAL_CRUD_DATABASE_PATH";
pub const INITIALIZE_SCHEMA_VAR: &str = "HOSPITAL_CRUD_INITIALIZE_SCHEMA";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} (expected true/false/1/0)")]
    InvalidBool { var: &'static str, value: String },
}

/// Where the patient database lives and how it is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` means an in-memory database
    pub database_path: Option<PathBuf>,
    pub initialize_schema: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            initialize_schema: true,
        }
    }
}

impl Config {
    /// Load from the process environment, reading a `.env` file first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup(DATABASE_PATH_VAR)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let initialize_schema = match lookup(INITIALIZE_SCHEMA_VAR) {
            None => true,
            Some(value) => parse_bool(INITIALIZE_SCHEMA_VAR, &value)?,
        };

        Ok(Self {
            database_path,
            initialize_schema,
        })
    }

    /// Open the database this configuration describes.
    pub fn open_database(&self) -> DbResult<Database> {
        let db = match &self.database_path {
            Some(path) => Database::open_uninitialized(path)?,
            None => Database::open_in_memory_uninitialized()?,
        };
        if self.initialize_schema {
            db.initialize()?;
        }
        Ok(db)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

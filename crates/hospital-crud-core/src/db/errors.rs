//! Classification of raw SQLite failures into store signals.

use rusqlite::ffi;

use crate::store::StoreError;

/// Prefix of the CHECK constraints that bound column lengths.
pub const LENGTH_CONSTRAINT_PREFIX: &str = "length_";

const UNIQUE_FAILED: &str = "UNIQUE constraint failed: ";
const CHECK_FAILED: &str = "CHECK constraint failed: ";
const NO_SUCH_TABLE: &str = "no such table: ";

/// Map a rusqlite error onto the backend-neutral [`StoreError`].
///
/// Anything not recognized becomes [`StoreError::Other`] with the original
/// message.
pub fn classify_sqlite_error(err: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, Some(message)) = &err {
        match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                if let Some(constraint) = message.strip_prefix(UNIQUE_FAILED) {
                    return StoreError::UniqueViolation {
                        constraint: constraint.trim().to_string(),
                    };
                }
            }
            ffi::SQLITE_CONSTRAINT_CHECK => {
                if let Some(column) = message
                    .strip_prefix(CHECK_FAILED)
                    .and_then(|name| name.trim().strip_prefix(LENGTH_CONSTRAINT_PREFIX))
                {
                    return StoreError::ValueTooLong {
                        column: column.to_string(),
                    };
                }
            }
            _ => {
                if let Some(relation) = message.strip_prefix(NO_SUCH_TABLE) {
                    return StoreError::UndefinedTable {
                        relation: relation.trim().to_string(),
                    };
                }
            }
        }
    }

    StoreError::Other(err.to_string())
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        classify_sqlite_error(err)
    }
}

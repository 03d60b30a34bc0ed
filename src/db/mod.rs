//! Database layer for person-roster
//!
//! Handles SQLite persistence for person records.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] — Database lifecycle and schema creation
//! - [`persons`] — Person insert and ordered read-back

use crate::config::Collation;
use crate::types::{NameParts, Person};
use sqlx::{FromRow, sqlite::SqlitePool};

mod migrations;
mod persons;

/// Person record from database (name stored split)
#[derive(Debug, Clone, FromRow)]
pub struct PersonRow {
    /// Part of the name before the first space
    pub first_name: Option<String>,
    /// Part of the name after the first space
    pub last_name: Option<String>,
    /// Language label
    pub language: Option<String>,
    /// Source identifier
    pub id: Option<String>,
    /// Biography text
    pub bio: Option<String>,
    /// Version number
    pub version: Option<f64>,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        let name = NameParts {
            first: row.first_name,
            last: row.last_name,
        }
        .join();

        Person {
            name,
            language: row.language,
            id: row.id,
            bio: row.bio,
            version: row.version,
        }
    }
}

/// Database handle for person-roster
///
/// Backed by a single-connection pool: one exclusive handle for the lifetime
/// of the store.
pub struct Database {
    pool: SqlitePool,
    collation: Collation,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

//! Database lifecycle and schema creation.

use crate::collation::{FOLDED_COLLATION, folded_compare};
use crate::config::{Collation, StoreConfig, StoreLocation};
use crate::error::DatabaseError;
use crate::{Error, Result};
use sqlx::SqliteConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use super::Database;

impl Database {
    /// Open the store described by `config` and create the schema if needed
    ///
    /// File stores get their parent directory created. In-memory stores are
    /// private to the returned handle and start empty on every open.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let options = match &config.location {
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        Error::Database(DatabaseError::ConnectionFailed(format!(
                            "Failed to create database directory: {}",
                            e
                        )))
                    })?;
                }

                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
            }
            StoreLocation::Memory { name } => {
                SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
                    Error::Database(DatabaseError::ConnectionFailed(format!(
                        "Failed to configure in-memory store '{}': {}",
                        name, e
                    )))
                })?
            }
        };
        let options = options.collation(FOLDED_COLLATION, folded_compare);

        // An in-memory database disappears with its last connection, so the
        // single connection is never reaped
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::ConnectionFailed(format!(
                    "Failed to connect to database: {}",
                    e
                )))
            })?;

        let db = Self {
            pool,
            collation: config.collation,
        };

        db.create_schema().await?;

        tracing::debug!(
            location = ?config.location,
            collation = config.collation.sql_name(),
            "Record store opened"
        );

        Ok(db)
    }

    /// Create the persons table and the name index for the active collation
    async fn create_schema(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            Error::Database(DatabaseError::ConnectionFailed(format!(
                "Failed to acquire connection: {}",
                e
            )))
        })?;

        sqlx::query("BEGIN")
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::MigrationFailed(format!(
                    "Failed to begin transaction: {}",
                    e
                )))
            })?;

        let result = async {
            Self::create_persons_table(&mut *conn).await?;
            Self::create_name_index(&mut *conn, self.collation).await?;
            Ok::<(), Error>(())
        }
        .await;

        match result {
            Ok(()) => {
                sqlx::query("COMMIT")
                    .execute(&mut *conn)
                    .await
                    .map_err(|e| {
                        Error::Database(DatabaseError::MigrationFailed(format!(
                            "Failed to commit schema: {}",
                            e
                        )))
                    })?;
            }
            Err(e) => {
                let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
                return Err(e);
            }
        }

        Ok(())
    }

    async fn create_persons_table(conn: &mut SqliteConnection) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS persons (
                first_name TEXT,
                last_name TEXT,
                language TEXT,
                id TEXT,
                bio TEXT,
                version REAL
            )
            "#,
        )
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::MigrationFailed(format!(
                "Failed to create persons table: {}",
                e
            )))
        })?;

        Ok(())
    }

    async fn create_name_index(conn: &mut SqliteConnection, collation: Collation) -> Result<()> {
        let collate = collation.sql_name();
        let statement = format!(
            "CREATE INDEX IF NOT EXISTS idx_persons_name_{} ON persons (last_name COLLATE {}, first_name COLLATE {})",
            collate.to_lowercase(),
            collate,
            collate
        );

        sqlx::query(&statement)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::MigrationFailed(format!(
                    "Failed to create name index: {}",
                    e
                )))
            })?;

        Ok(())
    }

    /// Close the database connection
    pub async fn close(self) {
        self.pool.close().await;
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Collation used by ordered reads
    pub fn collation(&self) -> Collation {
        self.collation
    }
}

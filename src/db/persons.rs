//! Person insert and ordered read-back.

use crate::types::Person;
use crate::{Error, Result};
use sqlx::SqliteConnection;

use super::{Database, PersonRow};

const INSERT_PERSON: &str = r#"
    INSERT INTO persons (first_name, last_name, language, id, bio, version)
    VALUES (?, ?, ?, ?, ?, ?)
"#;

impl Database {
    /// Insert one person, storing the name split on its first space
    pub async fn insert_person(&self, person: &Person) -> Result<()> {
        let mut conn = self.pool.acquire().await.map_err(Error::Sqlx)?;
        Self::insert_with(&mut *conn, person).await
    }

    /// Insert people in arrival order within a single transaction
    ///
    /// Duplicates are kept; nothing is inserted if any row fails.
    pub async fn insert_people(&self, people: &[Person]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Sqlx)?;

        for person in people {
            Self::insert_with(&mut *tx, person).await?;
        }

        tx.commit().await.map_err(Error::Sqlx)?;
        tracing::debug!(count = people.len(), "Inserted person records");
        Ok(())
    }

    async fn insert_with(conn: &mut SqliteConnection, person: &Person) -> Result<()> {
        let parts = person.name_parts();

        sqlx::query(INSERT_PERSON)
            .bind(parts.first)
            .bind(parts.last)
            .bind(&person.language)
            .bind(&person.id)
            .bind(&person.bio)
            .bind(person.version)
            .execute(&mut *conn)
            .await
            .map_err(Error::Sqlx)?;

        Ok(())
    }

    /// All people ordered by last name, then first name, ascending
    ///
    /// Uses the store's collation. Missing names sort first; equal names keep
    /// insertion order.
    pub async fn people_by_name(&self) -> Result<Vec<Person>> {
        let collate = self.collation.sql_name();
        let query = format!(
            r#"
            SELECT first_name, last_name, language, id, bio, version
            FROM persons
            ORDER BY last_name COLLATE {collate}, first_name COLLATE {collate}, rowid
            "#
        );

        let rows = sqlx::query_as::<_, PersonRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Sqlx)?;

        Ok(rows.into_iter().map(Person::from).collect())
    }

    /// Number of stored people
    pub async fn count_people(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Sqlx)?;

        Ok(count)
    }
}

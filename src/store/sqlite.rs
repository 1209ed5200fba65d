use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{
    error::StoreError,
    models::{Assignment, AssignmentRow, NewAssignment},
};

const COLUMNS: &str = "id, subject, title, deadline, is_submitted, priority, url, memo";

/// Local stand-in for the hosted table, used for development and tests.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url` and applies the
    /// embedded migrations.
    ///
    /// The pool holds a single connection that never expires, so
    /// `sqlite::memory:` keeps its data for the lifetime of the store.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn create(&self, new: &NewAssignment) -> Result<Assignment, StoreError> {
        let row = sqlx::query_as::<_, AssignmentRow>(&format!(
            "INSERT INTO assignments (subject, title, deadline, is_submitted, priority, url, memo)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {COLUMNS}"
        ))
        .bind(&new.subject)
        .bind(&new.title)
        .bind(new.deadline.to_string())
        .bind(new.is_submitted)
        .bind(new.priority.as_str())
        .bind(&new.url)
        .bind(&new.memo)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    pub async fn list_all(&self) -> Result<Vec<Assignment>, StoreError> {
        sqlx::query_as::<_, AssignmentRow>(&format!(
            "SELECT {COLUMNS} FROM assignments ORDER BY deadline ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Assignment::try_from)
        .collect()
    }

    pub async fn set_submitted(&self, id: i64, value: bool) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE assignments SET is_submitted = ? WHERE id = ?")
            .bind(value)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM assignments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

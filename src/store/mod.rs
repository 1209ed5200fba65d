//! Data access for the `assignments` table.
//!
//! Every dashboard action maps onto one of four calls. Both backends return
//! rows ordered by deadline, then id, and neither treats deleting a missing
//! row as an error.

use crate::{
    error::StoreError,
    models::{Assignment, NewAssignment},
};

pub use rest::RestStore;
pub use sqlite::SqliteStore;

mod rest;
mod sqlite;

pub const TABLE: &str = "assignments";

#[derive(Clone, Debug)]
pub enum Store {
    Rest(RestStore),
    Sqlite(SqliteStore),
}

impl Store {
    pub async fn create(&self, new: &NewAssignment) -> Result<Assignment, StoreError> {
        match self {
            Self::Rest(store) => store.create(new).await,
            Self::Sqlite(store) => store.create(new).await,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Assignment>, StoreError> {
        match self {
            Self::Rest(store) => store.list_all().await,
            Self::Sqlite(store) => store.list_all().await,
        }
    }

    /// Always issues the write, even when the row already holds `value`.
    pub async fn set_submitted(&self, id: i64, value: bool) -> Result<(), StoreError> {
        match self {
            Self::Rest(store) => store.set_submitted(id, value).await,
            Self::Sqlite(store) => store.set_submitted(id, value).await,
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        match self {
            Self::Rest(store) => store.delete(id).await,
            Self::Sqlite(store) => store.delete(id).await,
        }
    }
}

impl From<RestStore> for Store {
    fn from(store: RestStore) -> Self {
        Self::Rest(store)
    }
}

impl From<SqliteStore> for Store {
    fn from(store: SqliteStore) -> Self {
        Self::Sqlite(store)
    }
}

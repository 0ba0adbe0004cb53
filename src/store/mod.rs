//! Persistence gateway for student records. Handlers depend only on [`StudentStore`],
//! never on the storage technology behind it.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{open_pool, SqliteStore};

use crate::model::{NewStudent, Student};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no student found with id {0}")]
    NotFound(i64),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// The five record operations. Each maps to exactly one statement against the backing store.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert a row and return its store-assigned id.
    async fn create(&self, student: &NewStudent) -> Result<i64, StoreError>;

    /// Fetch one row; `StoreError::NotFound` when no row has this id.
    async fn find_by_id(&self, id: i64) -> Result<Student, StoreError>;

    /// All rows in store-native order. Empty table yields an empty vec.
    async fn list_all(&self) -> Result<Vec<Student>, StoreError>;

    /// Overwrite the row with this id. Returns the affected row count: 1, or 0 when the id does not exist.
    async fn update(&self, id: i64, student: &NewStudent) -> Result<u64, StoreError>;

    /// Remove the row with this id; `StoreError::NotFound` when nothing was deleted.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

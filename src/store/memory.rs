//! In-process [`StudentStore`] with the same observable behavior as the SQLite store.
//! Used to exercise handlers without a database.

use super::{StoreError, StudentStore};
use crate::model::{NewStudent, Student};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Student>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn create(&self, student: &NewStudent) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        // ids are never reused, matching AUTOINCREMENT
        inner.last_id += 1;
        let id = inner.last_id;
        inner.rows.insert(id, student.clone().into_student(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Student, StoreError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.rows.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn list_all(&self) -> Result<Vec<Student>, StoreError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.rows.values().cloned().collect())
    }

    async fn update(&self, id: i64, student: &NewStudent) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.rows.get_mut(&id) {
            Some(row) => {
                *row = student.clone().into_student(id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }
}

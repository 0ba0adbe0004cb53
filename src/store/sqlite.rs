//! SQLite-backed [`StudentStore`]. All values are bound as parameters; identifiers are fixed.

use super::{StoreError, StudentStore};
use crate::model::{NewStudent, Student};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS student (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        age INTEGER NOT NULL
    )
"#;
const INSERT: &str = "INSERT INTO student (name, email, age) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, name, email, age FROM student WHERE id = ? LIMIT 1";
const SELECT_ALL: &str = "SELECT id, name, email, age FROM student";
const UPDATE_BY_ID: &str = "UPDATE student SET name = ?, email = ?, age = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM student WHERE id = ?";

/// Open a pool for `db_path`, creating the file if missing. `:memory:` gives a
/// single long-lived connection so every caller sees the same in-memory database.
pub async fn open_pool(db_path: &str) -> Result<SqlitePool, StoreError> {
    if db_path == ":memory:" {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;
        return Ok(pool);
    }
    let opts = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap `pool` and create the `student` table if it does not exist yet.
    pub async fn try_new(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(SqliteStore { pool })
    }
}

#[async_trait]
impl StudentStore for SqliteStore {
    async fn create(&self, student: &NewStudent) -> Result<i64, StoreError> {
        tracing::debug!(sql = INSERT, age = student.age, "query");
        let result = sqlx::query(INSERT)
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.age)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn find_by_id(&self, id: i64) -> Result<Student, StoreError> {
        tracing::debug!(sql = SELECT_BY_ID, id, "query");
        sqlx::query_as::<_, Student>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn list_all(&self) -> Result<Vec<Student>, StoreError> {
        tracing::debug!(sql = SELECT_ALL, "query");
        let rows = sqlx::query_as::<_, Student>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, student: &NewStudent) -> Result<u64, StoreError> {
        tracing::debug!(sql = UPDATE_BY_ID, id, age = student.age, "query");
        let result = sqlx::query(UPDATE_BY_ID)
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.age)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        tracing::debug!(sql = DELETE_BY_ID, id, "query");
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// In-memory sink for formatted log lines.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    async fn store() -> SqliteStore {
        let pool = open_pool(":memory:").await.unwrap();
        SqliteStore::try_new(pool).await.unwrap()
    }

    fn student(name: &str, email: &str, age: i64) -> NewStudent {
        NewStudent {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    #[tokio::test]
    async fn create_then_find_returns_same_fields() {
        let store = store().await;
        let id = store.create(&student("Ann", "ann@x.com", 20)).await.unwrap();
        assert_eq!(id, 1);
        let found = store.find_by_id(id).await.unwrap();
        assert_eq!(
            found,
            Student {
                id: 1,
                name: "Ann".into(),
                email: "ann@x.com".into(),
                age: 20,
            }
        );
    }

    #[tokio::test]
    async fn ids_are_assigned_in_sequence() {
        let store = store().await;
        let a = store.create(&student("A", "a@x.com", 1)).await.unwrap();
        let b = store.create(&student("B", "b@x.com", 2)).await.unwrap();
        assert!(b > a);
    }

    #[tokio::test]
    async fn find_missing_is_not_found() {
        let store = store().await;
        let err = store.find_by_id(42).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
    }

    #[tokio::test]
    async fn list_all_on_empty_table_is_empty() {
        let store = store().await;
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_touches_only_the_target_row() {
        let store = store().await;
        let ann = store.create(&student("Ann", "ann@x.com", 20)).await.unwrap();
        let bob = store.create(&student("Bob", "bob@x.com", 30)).await.unwrap();

        let affected = store.update(ann, &student("Ann B", "ann@x.com", 21)).await.unwrap();
        assert_eq!(affected, 1);

        assert_eq!(store.find_by_id(ann).await.unwrap().name, "Ann B");
        let untouched = store.find_by_id(bob).await.unwrap();
        assert_eq!(untouched.name, "Bob");
        assert_eq!(untouched.age, 30);
    }

    #[tokio::test]
    async fn update_missing_id_affects_nothing() {
        let store = store().await;
        let ann = store.create(&student("Ann", "ann@x.com", 20)).await.unwrap();

        let affected = store.update(999, &student("Mallory", "m@x.com", 99)).await.unwrap();
        assert_eq!(affected, 0);

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, ann);
        assert_eq!(rows[0].name, "Ann");
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let store = store().await;
        let a = store.create(&student("A", "a@x.com", 1)).await.unwrap();
        let b = store.create(&student("B", "b@x.com", 2)).await.unwrap();
        let c = store.create(&student("C", "c@x.com", 3)).await.unwrap();

        store.delete(b).await.unwrap();

        let ids: Vec<i64> = store.list_all().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(matches!(store.delete(b).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn values_are_bound_not_interpolated() {
        let store = store().await;
        let name = "Robert'); DROP TABLE student;--";
        let id = store.create(&student(name, "bobby@x.com", 10)).await.unwrap();
        assert_eq!(store.find_by_id(id).await.unwrap().name, name);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn table_creation_is_idempotent() {
        let pool = open_pool(":memory:").await.unwrap();
        let first = SqliteStore::try_new(pool.clone()).await.unwrap();
        first.create(&student("Ann", "ann@x.com", 20)).await.unwrap();
        let second = SqliteStore::try_new(pool).await.unwrap();
        assert_eq!(second.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn statement_logs_omit_row_contents() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let store = store().await;
        let id = store.create(&student("Zelda Quartermaine", "zelda.q@private.example", 44)).await.unwrap();
        store.update(id, &student("Yara Quartermaine", "yara.q@private.example", 45)).await.unwrap();

        let text = logs.text();
        assert!(text.contains("INSERT INTO student"), "{}", text);
        assert!(text.contains("UPDATE student"), "{}", text);
        for secret in ["Zelda", "zelda.q@private.example", "Yara", "yara.q@private.example"] {
            assert!(!text.contains(secret), "{} leaked into logs: {}", secret, text);
        }
    }
}

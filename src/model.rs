//! Student record shapes: the persisted row, the raw request body, and the validated insert/update payload.

use serde::{Deserialize, Serialize};

/// One row of the `student` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Request body for create and update. Every field is optional here so that
/// validation can report all missing fields at once instead of failing on the first.
/// Unknown keys (including a client-supplied `id`) are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StudentInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

/// Validated payload handed to the store. Handlers obtain it from [`crate::service::validate_student`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl NewStudent {
    pub(crate) fn into_student(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

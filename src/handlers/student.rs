//! Student handlers: decode, validate, delegate to the store, encode. No SQL here.

use crate::error::AppError;
use crate::extractors::StudentId;
use crate::model::{NewStudent, StudentInput};
use crate::response::{created, ok, status_ok};
use crate::service::validate_student;
use crate::state::AppState;
use crate::store::StoreError;
use axum::{
    body::Bytes,
    extract::State,
    response::IntoResponse,
};

/// Decode the raw body and run validation. Empty body and malformed JSON are both 400.
fn decode_student(body: &Bytes) -> Result<NewStudent, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("empty body".into()));
    }
    let input: StudentInput = serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(validate_student(input)?)
}

/// POST /api/students
pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let student = decode_student(&body)?;
    let id = state.store.create(&student).await?;
    tracing::info!(id, "student created");
    Ok(created(id))
}

/// GET /api/student/:id
pub async fn read(
    State(state): State<AppState>,
    StudentId(id): StudentId,
) -> Result<impl IntoResponse, AppError> {
    let student = state.store.find_by_id(id).await?;
    Ok(ok(student))
}

/// GET /api/students
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let students = state.store.list_all().await?;
    Ok(ok(students))
}

/// PUT /api/student/:id — full replace; responds with the affected row count.
pub async fn update(
    State(state): State<AppState>,
    StudentId(id): StudentId,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let student = decode_student(&body)?;
    let affected = state.store.update(id, &student).await?;
    if affected == 0 {
        return Err(AppError::NotFound(StoreError::NotFound(id).to_string()));
    }
    tracing::info!(id, "student updated");
    Ok(ok(affected))
}

/// DELETE /api/student/:id
pub async fn delete(
    State(state): State<AppState>,
    StudentId(id): StudentId,
) -> Result<impl IntoResponse, AppError> {
    state.store.delete(id).await?;
    tracing::info!(id, "student deleted");
    Ok(status_ok())
}

//! Success response helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Created {
    pub success: i64,
}

#[derive(Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

pub fn created(id: i64) -> (StatusCode, Json<Created>) {
    (StatusCode::CREATED, Json(Created { success: id }))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn status_ok() -> (StatusCode, Json<StatusBody>) {
    ok(StatusBody { status: "OK" })
}

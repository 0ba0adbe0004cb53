//! Router assembly.

mod common;
mod student;

pub use common::common_routes;
pub use student::student_routes;

use crate::error::json_error_response;
use crate::state::AppState;
use axum::{middleware::map_response, Router};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Request bodies larger than this are rejected with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application router: student API, health/version, request tracing and body limit.
/// Every error response, including those produced by the framework, carries the JSON error body.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(student_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(map_response(json_error_response))
        .layer(TraceLayer::new_for_http())
}

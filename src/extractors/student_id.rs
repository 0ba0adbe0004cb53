//! Extract the integer student id from the `:id` path segment.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Path id parsed as `i64`. Undecodable or non-integer segments are a 400 with a JSON body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StudentId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for StudentId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let id = raw
            .parse()
            .map_err(|e| AppError::BadRequest(format!("invalid id {:?}: {}", raw, e)))?;
        Ok(StudentId(id))
    }
}

//! Request extractors that reject with [`crate::error::AppError`].

pub mod student_id;
pub use student_id::StudentId;

//! Request validation for student payloads.

mod validation;
pub use validation::{validate_student, ValidationErrors};

//! Student API: JSON CRUD over a single `student` table.

pub mod config;
pub mod error;
pub mod extractors;
pub mod model;
pub mod response;
pub mod server;
pub mod service;
pub mod state;
pub mod store;
pub mod handlers;
pub mod routes;

pub use config::{Args, Config};
pub use error::{AppError, ConfigError};
pub use model::{NewStudent, Student, StudentInput};
pub use routes::{app, common_routes, student_routes};
pub use server::{serve_with_shutdown, shutdown_signal};
pub use service::{validate_student, ValidationErrors};
pub use state::AppState;
pub use store::{open_pool, MemoryStore, SqliteStore, StoreError, StudentStore};

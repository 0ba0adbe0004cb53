//! Shared application state for all routes.

use crate::store::StudentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Opened once at startup and shared by every request.
    pub store: Arc<dyn StudentStore>,
}

impl AppState {
    pub fn new(store: impl StudentStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}

use std::sync::Arc;

use axum::Router;
use sea_orm::{DatabaseBackend, MockDatabase};

use crate::{routes::router, state::AppState};

/// Router over a mock connection with no prepared results: any handler that
/// reaches the store fails, which makes it useful for validation-path tests.
pub fn test_router() -> Router {
    let db = MockDatabase::new(DatabaseBackend::MySql).into_connection();
    let state = AppState::new(db);
    router(Arc::clone(&state))
}

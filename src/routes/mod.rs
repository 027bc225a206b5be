use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod todo;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().merge(todo::router(state))
}

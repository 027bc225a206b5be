use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::db::todo_store::TodoStore;

pub struct AppState {
    pub store: TodoStore,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self {
            store: TodoStore::new(db),
        })
    }
}

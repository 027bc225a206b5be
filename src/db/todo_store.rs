use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};
use thiserror::Error;

use super::entities::prelude::Todo;
use super::entities::todo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sea_orm::DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The record store for the `todos` table. Owns the connection pool it is
/// constructed with; every operation is a single statement and safe to call
/// from concurrent requests. Shared through `AppState`'s `Arc`, so no
/// `Clone` impl is needed.
pub struct TodoStore {
    db: DatabaseConnection,
}

impl TodoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All rows, ordered by id so the rendered list is stable across calls.
    pub async fn list(&self) -> StoreResult<Vec<todo::Model>> {
        let todos = Todo::find()
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await?;
        Ok(todos)
    }

    /// Creates an open todo and returns it with its store-assigned id.
    pub async fn insert(&self, item: &str) -> StoreResult<todo::Model> {
        if item.is_empty() {
            return Err(StoreError::InvalidInput("Item required"));
        }
        let model = todo::ActiveModel {
            item: Set(item.to_string()),
            completed: Set(0),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Marks the row as done. A missing id is a silent no-op, never an
    /// error; completion is one-directional, there is no way back to open.
    pub async fn complete(&self, id: i32) -> StoreResult<()> {
        let id = valid_id(id)?;
        Todo::update_many()
            .col_expr(todo::Column::Completed, Expr::value(1))
            .filter(todo::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Removes the row. A missing id is a silent no-op here too.
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let id = valid_id(id)?;
        Todo::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

fn valid_id(id: i32) -> StoreResult<i32> {
    if id <= 0 {
        return Err(StoreError::InvalidInput("Id must be positive"));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    use super::{StoreError, TodoStore};
    use crate::db::entities::todo;

    fn row(id: i32, item: &str, completed: i32) -> todo::Model {
        todo::Model {
            id,
            item: item.to_string(),
            completed,
        }
    }

    #[tokio::test]
    async fn list_returns_all_rows() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![
                row(1, "Buy groceries", 0),
                row(2, "Walk the dog", 1),
            ]])
            .into_connection();

        let todos = TodoStore::new(db).list().await.expect("list rows");
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0], row(1, "Buy groceries", 0));
        assert_eq!(todos[1], row(2, "Walk the dog", 1));
    }

    #[tokio::test]
    async fn insert_returns_created_row() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .append_query_results([vec![row(1, "Test todo", 0)]])
            .into_connection();

        let created = TodoStore::new(db)
            .insert("Test todo")
            .await
            .expect("insert row");
        assert_eq!(created.id, 1);
        assert_eq!(created.item, "Test todo");
        assert_eq!(created.completed, 0);
    }

    #[tokio::test]
    async fn insert_rejects_empty_item_without_touching_the_store() {
        // No prepared results: any statement would fail the test.
        let db = MockDatabase::new(DatabaseBackend::MySql).into_connection();

        let err = TodoStore::new(db).insert("").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn complete_on_missing_id_is_a_no_op() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        TodoStore::new(db)
            .complete(42)
            .await
            .expect("missing id should not error");
    }

    #[tokio::test]
    async fn delete_on_missing_id_is_a_no_op() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        TodoStore::new(db)
            .delete(42)
            .await
            .expect("missing id should not error");
    }

    #[tokio::test]
    async fn non_positive_ids_are_rejected() {
        let db = MockDatabase::new(DatabaseBackend::MySql).into_connection();
        let store = TodoStore::new(db);

        let err = store.complete(0).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        let err = store.delete(-1).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn connection_failure_surfaces_as_unavailable() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_errors([DbErr::Conn(RuntimeErr::Internal(
                "connection refused".to_string(),
            ))])
            .into_connection();

        let err = TodoStore::new(db).list().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}

pub mod entities;
pub mod todo_store;

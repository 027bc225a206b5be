pub mod todo;

pub mod prelude {
    pub use super::todo::Entity as Todo;
}

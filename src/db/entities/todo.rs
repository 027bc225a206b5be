use sea_orm::entity::prelude::*;

/// A single task row. `completed` is 0 or 1, never anything else; it is the
/// only column that changes after insert.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item: String,
    #[sea_orm(default_value = 0)]
    pub completed: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

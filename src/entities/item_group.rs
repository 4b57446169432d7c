//! Item group entity - Named collection of items a policy can scope to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item group database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_groups")]
pub struct Model {
    /// Unique identifier for the group
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Group name, unique among item groups
    #[sea_orm(unique)]
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// Defines relationships between `ItemGroup` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One group has many member items
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Event group entity - Named collection of events a policy can scope to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event group database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_groups")]
pub struct Model {
    /// Unique identifier for the group
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Group name, unique among event groups
    #[sea_orm(unique)]
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// Defines relationships between `EventGroup` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One group has many member events
    #[sea_orm(has_many = "super::event::Entity")]
    Events,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Event entity - The trip or occasion a transaction happens under.
//!
//! Group membership is a foreign key on the member row: an event belongs to
//! at most one event group, or to none.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    /// Unique identifier for the event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Event group this event belongs to, if any
    pub group_id: Option<i64>,
}

/// Defines relationships between Event and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each event belongs to at most one event group
    #[sea_orm(
        belongs_to = "super::event_group::Entity",
        from = "Column::GroupId",
        to = "super::event_group::Column::Id"
    )]
    Group,
}

impl Related<super::event_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

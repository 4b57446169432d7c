//! Item entity - A purchasable good or service a transaction is for.
//!
//! Group membership is a foreign key on the member row: an item belongs to
//! at most one item group, or to none.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Item group this item belongs to, if any
    pub group_id: Option<i64>,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to at most one item group
    #[sea_orm(
        belongs_to = "super::item_group::Entity",
        from = "Column::GroupId",
        to = "super::item_group::Column::Id"
    )]
    Group,
}

impl Related<super::item_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Customer entity - A spender transactions are charged against.
//!
//! Group membership is a foreign key on the member row: a customer belongs to
//! at most one customer group, or to none.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Customer group this customer belongs to, if any
    pub group_id: Option<i64>,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each customer belongs to at most one customer group
    #[sea_orm(
        belongs_to = "super::customer_group::Entity",
        from = "Column::GroupId",
        to = "super::customer_group::Column::Id"
    )]
    Group,
}

impl Related<super::customer_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

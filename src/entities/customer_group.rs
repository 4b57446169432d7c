//! Customer group entity - Named collection of customers a policy can scope to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer group database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_groups")]
pub struct Model {
    /// Unique identifier for the group
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Group name, unique among customer groups
    #[sea_orm(unique)]
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// Defines relationships between `CustomerGroup` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One group has many member customers
    #[sea_orm(has_many = "super::customer::Entity")]
    Customers,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Vendor entity - A merchant transactions are placed with.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vendor database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    /// Unique identifier for the vendor
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Vendor name, unique
    #[sea_orm(unique)]
    pub name: String,
}

/// Vendor has no owned relationships; policies reference it through
/// the `policy_vendors` join table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Budget consumption entity - Per-policy, per-period consumed amounts.
//!
//! One row per `(policy_id, period_index)` bucket. The composite primary key
//! makes the bucket unique, which is what the guarded atomic increment in
//! [`crate::core::budget`] relies on.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget consumption database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_consumption")]
pub struct Model {
    /// Policy whose budget this bucket draws from
    #[sea_orm(primary_key, auto_increment = false)]
    pub policy_id: i64,
    /// Which occurrence of the policy's budget interval this bucket covers
    #[sea_orm(primary_key, auto_increment = false)]
    pub period_index: i64,
    /// Total amount consumed in this period, in dollars
    pub consumed: f64,
    /// When this bucket was last incremented
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `Consumption` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each bucket belongs to one policy
    #[sea_orm(
        belongs_to = "super::policy::Entity",
        from = "Column::PolicyId",
        to = "super::policy::Column::Id"
    )]
    Policy,
}

impl Related<super::policy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Policy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

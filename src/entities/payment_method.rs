//! Payment method entity - A concrete instrument transactions are paid with.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::policy::PaymentType;

/// Payment method database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_methods")]
pub struct Model {
    /// Unique identifier for the payment method
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique (e.g. "Corporate Visa ...1234")
    #[sea_orm(unique)]
    pub name: String,
    /// Kind of instrument this method is
    pub method_type: PaymentType,
}

/// Payment method has no owned relationships; policies reference it through
/// the `policy_payment_methods` join table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

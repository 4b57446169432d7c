//! Policy entity - Represents an administrator-defined spending-control policy.
//!
//! Each policy carries a lifecycle status, an allow/block action, an interval
//! budget with a start (and optional end) date, and an optional approval gate.
//! Which transactions a policy applies to is declared separately through the
//! scope relation tables in [`super::scope`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Policy lifecycle status. Only `active` policies participate in decisions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PolicyStatus {
    /// Being drafted, not yet enforced
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Enforced by the decision engine
    #[sea_orm(string_value = "active")]
    Active,
    /// Retired but retained for history
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

/// What a matching policy does to a transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum PolicyAction {
    /// Permit matching transactions, subject to budget headroom
    #[sea_orm(string_value = "allow")]
    Allow,
    /// Block matching transactions unconditionally
    #[sea_orm(string_value = "block")]
    Block,
}

/// How often a policy's budget resets.
///
/// `Daily` and `Weekly` are fixed-duration; `Monthly`, `Quarterly`, and
/// `Annually` advance by calendar units; `OneTime` has a single period
/// spanning the whole budget window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BudgetInterval {
    /// Budget resets every day
    #[sea_orm(string_value = "daily")]
    Daily,
    /// Budget resets every seven days
    #[sea_orm(string_value = "weekly")]
    Weekly,
    /// Budget resets every calendar month
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// Budget resets every three calendar months
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
    /// Budget resets every calendar year
    #[sea_orm(string_value = "annually")]
    Annually,
    /// Single budget for the whole policy window
    #[sea_orm(string_value = "one_time")]
    OneTime,
}

/// Payment type tags a policy may restrict itself to.
///
/// Stored on the policy row as a comma-joined tag set and on each payment
/// method as its kind. Matching is by payment-method id; the tag set is
/// administrative metadata validated at the API boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PaymentType {
    /// Corporate or personal card
    #[sea_orm(string_value = "card")]
    Card,
    /// Bank transfer / ACH
    #[sea_orm(string_value = "ach")]
    Ach,
    /// Wire transfer
    #[sea_orm(string_value = "wire")]
    Wire,
    /// Invoice billed to the account
    #[sea_orm(string_value = "invoice")]
    Invoice,
}

/// Policy database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "policies")]
pub struct Model {
    /// Unique identifier for the policy
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Optional human-readable description
    pub description: Option<String>,
    /// Lifecycle status
    pub status: PolicyStatus,
    /// Allow or block matching transactions
    pub action: PolicyAction,
    /// Budget ceiling per interval occurrence, in dollars
    pub budget_amount: f64,
    /// How often the budget resets
    pub budget_interval: BudgetInterval,
    /// First day the policy's budget window is in effect
    pub budget_start_date: Date,
    /// Last day of the budget window (inclusive), unbounded when absent
    pub budget_end_date: Option<Date>,
    /// Whether amounts above the threshold need manual approval
    pub require_approval: bool,
    /// Approval threshold in dollars, set iff `require_approval`
    pub approval_threshold: Option<f64>,
    /// Comma-joined [`PaymentType`] tags, empty when unrestricted
    pub allowed_payment_types: String,
    /// When the policy was created
    pub created_at: DateTimeUtc,
    /// When the policy was last mutated
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Policy and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Per-period consumption buckets for this policy
    #[sea_orm(has_many = "super::consumption::Entity")]
    Consumption,
}

impl Related<super::consumption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consumption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

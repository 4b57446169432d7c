//! Shared test utilities for `SpendGuard`.
//!
//! This module provides common helper functions for setting up test databases
//! and building a small catalog world with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        catalog,
        decision::CandidateTransaction,
        group,
        policy::{PolicySpec, ScopeSpec},
    },
    entities,
    entities::policy::{BudgetInterval, PaymentType, PolicyAction, PolicyStatus},
    errors::Result,
};
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A small catalog fixture most policy and decision tests share.
pub struct TestWorld {
    /// Connected in-memory database
    pub db: DatabaseConnection,
    /// Customer group the default policy scopes to
    pub customer_group: entities::customer_group::Model,
    /// Customer inside `customer_group`
    pub customer: entities::customer::Model,
    /// Customer belonging to no group
    pub outsider: entities::customer::Model,
    /// Item group, unreferenced by the default policy
    pub item_group: entities::item_group::Model,
    /// Item inside `item_group`
    pub item: entities::item::Model,
    /// Event group, unreferenced by the default policy
    pub event_group: entities::event_group::Model,
    /// Event inside `event_group`
    pub event: entities::event::Model,
    /// Vendor the default policy allows
    pub vendor: entities::vendor::Model,
    /// A second vendor outside the default policy
    pub other_vendor: entities::vendor::Model,
    /// Payment method the default policy allows
    pub payment_method: entities::payment_method::Model,
    /// A second payment method outside the default policy
    pub other_payment_method: entities::payment_method::Model,
}

/// Sets up a complete test environment: database plus a populated catalog.
pub async fn setup_world() -> Result<TestWorld> {
    let db = setup_test_db().await?;

    let customer_group = group::create_customer_group(&db, "Field Sales", None).await?;
    let customer = catalog::create_customer(&db, "Ada Lovelace", Some(customer_group.id)).await?;
    let outsider = catalog::create_customer(&db, "Grace Hopper", None).await?;

    let item_group = group::create_item_group(&db, "Flights", None).await?;
    let item = catalog::create_item(&db, "Economy seat", Some(item_group.id)).await?;

    let event_group = group::create_event_group(&db, "Conferences", None).await?;
    let event = catalog::create_event(&db, "Annual Kickoff", Some(event_group.id)).await?;

    let vendor = catalog::create_vendor(&db, "Acme Travel").await?;
    let other_vendor = catalog::create_vendor(&db, "Globex Air").await?;

    let payment_method =
        catalog::create_payment_method(&db, "Corporate Visa", PaymentType::Card).await?;
    let other_payment_method =
        catalog::create_payment_method(&db, "Treasury ACH", PaymentType::Ach).await?;

    Ok(TestWorld {
        db,
        customer_group,
        customer,
        outsider,
        item_group,
        item,
        event_group,
        event,
        vendor,
        other_vendor,
        payment_method,
        other_payment_method,
    })
}

/// Builds the default policy spec against a [`TestWorld`].
///
/// # Defaults
/// * `status`: active, `action`: allow
/// * `budget_amount`: 1000.0, `budget_interval`: monthly
/// * `budget_start_date`: 2026-01-01, no end date
/// * scope: the world's customer group, vendor, and payment method
pub fn test_policy_spec(world: &TestWorld) -> PolicySpec {
    PolicySpec {
        description: Some("Test policy".to_string()),
        status: PolicyStatus::Active,
        action: PolicyAction::Allow,
        budget_amount: 1000.0,
        budget_interval: BudgetInterval::Monthly,
        budget_start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        budget_end_date: None,
        require_approval: false,
        approval_threshold: None,
        allowed_payment_types: Vec::new(),
        scope: ScopeSpec {
            customer_groups: Some(vec![world.customer_group.id]),
            vendors: Some(vec![world.vendor.id]),
            payment_methods: Some(vec![world.payment_method.id]),
            ..ScopeSpec::default()
        },
    }
}

/// Builds a candidate transaction matching the default policy spec's scope,
/// timestamped 2026-03-15 (period 2 of a monthly policy starting Jan 1).
pub fn test_transaction(world: &TestWorld, amount: f64) -> CandidateTransaction {
    CandidateTransaction {
        customer_id: world.customer.id,
        item_id: world.item.id,
        event_id: world.event.id,
        vendor_id: world.vendor.id,
        payment_method_id: world.payment_method.id,
        amount,
        currency: "USD".to_string(),
        timestamp: Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap(),
    }
}

//! Database configuration module for `SpendGuard`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. The module uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to automatically generate SQL statements
//! from the entity models, ensuring that the database schema matches the Rust struct
//! definitions without requiring manual SQL.

use crate::entities::{
    Consumption, Customer, CustomerGroup, Event, EventGroup, Item, ItemGroup, PaymentMethod,
    Policy, Vendor, policy_customer, policy_customer_group, policy_event, policy_event_group,
    policy_item, policy_item_group, policy_payment_method, policy_vendor,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/spendguard.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// Covers the policy table, the catalog tables, the eight scope relation join
/// tables, and the budget consumption table. Idempotent: existing tables are
/// left alone, so the bootstrap binary can run repeatedly.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Catalog tables precede the join tables so foreign keys resolve
    let mut statements = vec![
        schema.create_table_from_entity(CustomerGroup),
        schema.create_table_from_entity(ItemGroup),
        schema.create_table_from_entity(EventGroup),
        schema.create_table_from_entity(Customer),
        schema.create_table_from_entity(Item),
        schema.create_table_from_entity(Event),
        schema.create_table_from_entity(Vendor),
        schema.create_table_from_entity(PaymentMethod),
        schema.create_table_from_entity(Policy),
        schema.create_table_from_entity(policy_item_group::Entity),
        schema.create_table_from_entity(policy_customer_group::Entity),
        schema.create_table_from_entity(policy_event_group::Entity),
        schema.create_table_from_entity(policy_payment_method::Entity),
        schema.create_table_from_entity(policy_vendor::Entity),
        schema.create_table_from_entity(policy_item::Entity),
        schema.create_table_from_entity(policy_customer::Entity),
        schema.create_table_from_entity(policy_event::Entity),
        schema.create_table_from_entity(Consumption),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
    }
    for statement in &statements {
        db.execute(builder.build(statement)).await?;
    }

    Ok(())
}

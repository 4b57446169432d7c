//! Catalog management - The entities transactions reference.
//!
//! Customers, items, and events carry their group membership as a foreign key
//! on the member row; vendors and payment methods are flat allow-list targets.

use crate::{
    entities::{
        Customer, CustomerGroup, Event, EventGroup, Item, ItemGroup, PaymentMethod, Vendor,
        customer, customer_group, event, event_group, item, item_group, payment_method,
        policy::PaymentType, vendor,
    },
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Finds a customer by its unique id, returning None if absent.
pub async fn get_customer(db: &DatabaseConnection, id: i64) -> Result<Option<customer::Model>> {
    Customer::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds an item by its unique id, returning None if absent.
pub async fn get_item(db: &DatabaseConnection, id: i64) -> Result<Option<item::Model>> {
    Item::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds an event by its unique id, returning None if absent.
pub async fn get_event(db: &DatabaseConnection, id: i64) -> Result<Option<event::Model>> {
    Event::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds a vendor by its unique id, returning None if absent.
pub async fn get_vendor(db: &DatabaseConnection, id: i64) -> Result<Option<vendor::Model>> {
    Vendor::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds a payment method by its unique id, returning None if absent.
pub async fn get_payment_method(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<payment_method::Model>> {
    PaymentMethod::find_by_id(id).one(db).await.map_err(Into::into)
}

fn validated_name(name: &str, what: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation(format!("{what} name cannot be empty")));
    }
    Ok(name.to_string())
}

/// Creates a customer, optionally placing it in an existing customer group.
pub async fn create_customer(
    db: &DatabaseConnection,
    name: &str,
    group_id: Option<i64>,
) -> Result<customer::Model> {
    let name = validated_name(name, "customer")?;
    if let Some(id) = group_id {
        CustomerGroup::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::EntityNotFound {
                entity: "customer_group",
                id,
            })?;
    }

    customer::ActiveModel {
        name: Set(name),
        group_id: Set(group_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Moves a customer into a group, or out of any group with `None`.
pub async fn assign_customer_group(
    db: &DatabaseConnection,
    customer_id: i64,
    group_id: Option<i64>,
) -> Result<customer::Model> {
    let found = Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or(Error::EntityNotFound {
            entity: "customer",
            id: customer_id,
        })?;
    if let Some(id) = group_id {
        CustomerGroup::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::EntityNotFound {
                entity: "customer_group",
                id,
            })?;
    }

    let mut active: customer::ActiveModel = found.into();
    active.group_id = Set(group_id);
    active.update(db).await.map_err(Into::into)
}

/// Creates an item, optionally placing it in an existing item group.
pub async fn create_item(
    db: &DatabaseConnection,
    name: &str,
    group_id: Option<i64>,
) -> Result<item::Model> {
    let name = validated_name(name, "item")?;
    if let Some(id) = group_id {
        ItemGroup::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::EntityNotFound {
                entity: "item_group",
                id,
            })?;
    }

    item::ActiveModel {
        name: Set(name),
        group_id: Set(group_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Moves an item into a group, or out of any group with `None`.
pub async fn assign_item_group(
    db: &DatabaseConnection,
    item_id: i64,
    group_id: Option<i64>,
) -> Result<item::Model> {
    let found = Item::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::EntityNotFound {
            entity: "item",
            id: item_id,
        })?;
    if let Some(id) = group_id {
        ItemGroup::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::EntityNotFound {
                entity: "item_group",
                id,
            })?;
    }

    let mut active: item::ActiveModel = found.into();
    active.group_id = Set(group_id);
    active.update(db).await.map_err(Into::into)
}

/// Creates an event, optionally placing it in an existing event group.
pub async fn create_event(
    db: &DatabaseConnection,
    name: &str,
    group_id: Option<i64>,
) -> Result<event::Model> {
    let name = validated_name(name, "event")?;
    if let Some(id) = group_id {
        EventGroup::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::EntityNotFound {
                entity: "event_group",
                id,
            })?;
    }

    event::ActiveModel {
        name: Set(name),
        group_id: Set(group_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Moves an event into a group, or out of any group with `None`.
pub async fn assign_event_group(
    db: &DatabaseConnection,
    event_id: i64,
    group_id: Option<i64>,
) -> Result<event::Model> {
    let found = Event::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or(Error::EntityNotFound {
            entity: "event",
            id: event_id,
        })?;
    if let Some(id) = group_id {
        EventGroup::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::EntityNotFound {
                entity: "event_group",
                id,
            })?;
    }

    let mut active: event::ActiveModel = found.into();
    active.group_id = Set(group_id);
    active.update(db).await.map_err(Into::into)
}

/// Creates a vendor with a unique, non-empty name.
pub async fn create_vendor(db: &DatabaseConnection, name: &str) -> Result<vendor::Model> {
    let name = validated_name(name, "vendor")?;

    let duplicate = Vendor::find()
        .filter(vendor::Column::Name.eq(name.as_str()))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(Error::conflict(format!("vendor name already exists: {name}")));
    }

    vendor::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a payment method of the given type with a unique, non-empty name.
pub async fn create_payment_method(
    db: &DatabaseConnection,
    name: &str,
    method_type: PaymentType,
) -> Result<payment_method::Model> {
    let name = validated_name(name, "payment method")?;

    let duplicate = PaymentMethod::find()
        .filter(payment_method::Column::Name.eq(name.as_str()))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(Error::conflict(format!(
            "payment method name already exists: {name}"
        )));
    }

    payment_method::ActiveModel {
        name: Set(name),
        method_type: Set(method_type),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

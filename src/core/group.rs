//! Group management - Handles the three group types policies scope to.
//!
//! Group names are unique within their type, and deletion is guarded by an
//! in-use check applied uniformly: a group with members cannot be deleted,
//! whether it groups customers, items, or events.

use crate::{
    entities::{
        Customer, CustomerGroup, Event, EventGroup, Item, ItemGroup, customer, customer_group,
        event, event_group, item, item_group,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Returns all customer groups ordered by name.
pub async fn list_customer_groups(db: &DatabaseConnection) -> Result<Vec<customer_group::Model>> {
    CustomerGroup::find()
        .order_by_asc(customer_group::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns all item groups ordered by name.
pub async fn list_item_groups(db: &DatabaseConnection) -> Result<Vec<item_group::Model>> {
    ItemGroup::find()
        .order_by_asc(item_group::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns all event groups ordered by name.
pub async fn list_event_groups(db: &DatabaseConnection) -> Result<Vec<event_group::Model>> {
    EventGroup::find()
        .order_by_asc(event_group::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a customer group with a unique, non-empty name.
pub async fn create_customer_group(
    db: &DatabaseConnection,
    name: &str,
    description: Option<String>,
) -> Result<customer_group::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("group name cannot be empty"));
    }

    let duplicate = CustomerGroup::find()
        .filter(customer_group::Column::Name.eq(name))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(Error::conflict(format!(
            "customer group name already exists: {name}"
        )));
    }

    customer_group::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Deletes a customer group, refusing while any customer still belongs to it.
pub async fn delete_customer_group(db: &DatabaseConnection, id: i64) -> Result<()> {
    let group = CustomerGroup::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::EntityNotFound {
            entity: "customer_group",
            id,
        })?;

    let members = Customer::find()
        .filter(customer::Column::GroupId.eq(id))
        .count(db)
        .await?;
    if members > 0 {
        return Err(Error::conflict(format!(
            "customer group {id} still has {members} member(s)"
        )));
    }

    group.delete(db).await?;
    Ok(())
}

/// Creates an item group with a unique, non-empty name.
pub async fn create_item_group(
    db: &DatabaseConnection,
    name: &str,
    description: Option<String>,
) -> Result<item_group::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("group name cannot be empty"));
    }

    let duplicate = ItemGroup::find()
        .filter(item_group::Column::Name.eq(name))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(Error::conflict(format!(
            "item group name already exists: {name}"
        )));
    }

    item_group::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Deletes an item group, refusing while any item still belongs to it.
pub async fn delete_item_group(db: &DatabaseConnection, id: i64) -> Result<()> {
    let group = ItemGroup::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::EntityNotFound {
            entity: "item_group",
            id,
        })?;

    let members = Item::find()
        .filter(item::Column::GroupId.eq(id))
        .count(db)
        .await?;
    if members > 0 {
        return Err(Error::conflict(format!(
            "item group {id} still has {members} member(s)"
        )));
    }

    group.delete(db).await?;
    Ok(())
}

/// Creates an event group with a unique, non-empty name.
pub async fn create_event_group(
    db: &DatabaseConnection,
    name: &str,
    description: Option<String>,
) -> Result<event_group::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("group name cannot be empty"));
    }

    let duplicate = EventGroup::find()
        .filter(event_group::Column::Name.eq(name))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(Error::conflict(format!(
            "event group name already exists: {name}"
        )));
    }

    event_group::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Deletes an event group, refusing while any event still belongs to it.
pub async fn delete_event_group(db: &DatabaseConnection, id: i64) -> Result<()> {
    let group = EventGroup::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::EntityNotFound {
            entity: "event_group",
            id,
        })?;

    let members = Event::find()
        .filter(event::Column::GroupId.eq(id))
        .count(db)
        .await?;
    if members > 0 {
        return Err(Error::conflict(format!(
            "event group {id} still has {members} member(s)"
        )));
    }

    group.delete(db).await?;
    Ok(())
}

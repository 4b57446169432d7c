//! Policy store - Owns policy persistence and the scope relation rewrite.
//!
//! A policy and its scope relation rows are written as a single database
//! transaction: all relation inserts succeed or the policy write rolls back
//! with them, so a reader never observes a half-scoped policy. Updates replace
//! each provided relation set wholesale (delete-all-then-insert) rather than
//! diffing, which makes "set scope to X" idempotent.

use std::collections::BTreeSet;

use crate::{
    entities::{
        customer, customer_group, event, event_group, item, item_group, payment_method, policy,
        policy_customer, policy_customer_group, policy_event, policy_event_group, policy_item,
        policy_item_group, policy_payment_method, policy_vendor, vendor,
        consumption,
        policy::{BudgetInterval, PaymentType, PolicyAction, PolicyStatus},
    },
    errors::{Error, Result},
};
use sea_orm::{ActiveEnum, QueryOrder, Set, TransactionTrait, prelude::*};

/// Administrator-supplied policy fields, used by create and update.
#[derive(Debug, Clone)]
pub struct PolicySpec {
    /// Optional human-readable description
    pub description: Option<String>,
    /// Lifecycle status
    pub status: PolicyStatus,
    /// Allow or block matching transactions
    pub action: PolicyAction,
    /// Budget ceiling per interval occurrence, must be positive
    pub budget_amount: f64,
    /// How often the budget resets
    pub budget_interval: BudgetInterval,
    /// First day of the budget window
    pub budget_start_date: Date,
    /// Last day of the budget window (inclusive), must be after the start
    pub budget_end_date: Option<Date>,
    /// Whether amounts above the threshold need manual approval
    pub require_approval: bool,
    /// Approval threshold, required and positive iff `require_approval`
    pub approval_threshold: Option<f64>,
    /// Payment type tags this policy restricts itself to (may be empty)
    pub allowed_payment_types: Vec<PaymentType>,
    /// Scope relation id sets
    pub scope: ScopeSpec,
}

/// Scope relation ids for create/update.
///
/// `None` leaves a dimension untouched on update (and means empty on create);
/// `Some(vec![])` explicitly clears it.
#[derive(Debug, Clone, Default)]
pub struct ScopeSpec {
    /// Item group ids
    pub item_groups: Option<Vec<i64>>,
    /// Customer group ids
    pub customer_groups: Option<Vec<i64>>,
    /// Event group ids
    pub event_groups: Option<Vec<i64>>,
    /// Payment method ids
    pub payment_methods: Option<Vec<i64>>,
    /// Vendor ids
    pub vendors: Option<Vec<i64>>,
    /// Individual item overrides
    pub individual_items: Option<Vec<i64>>,
    /// Individual customer overrides
    pub individual_customers: Option<Vec<i64>>,
    /// Individual event overrides
    pub individual_events: Option<Vec<i64>>,
}

/// Fully resolved scope relation id sets for one policy.
///
/// `BTreeSet` keeps the sets deduplicated and deterministically ordered, so
/// repeated reads within a decision are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSets {
    /// Item group ids
    pub item_groups: BTreeSet<i64>,
    /// Customer group ids
    pub customer_groups: BTreeSet<i64>,
    /// Event group ids
    pub event_groups: BTreeSet<i64>,
    /// Payment method ids
    pub payment_methods: BTreeSet<i64>,
    /// Vendor ids
    pub vendors: BTreeSet<i64>,
    /// Individual item overrides
    pub individual_items: BTreeSet<i64>,
    /// Individual customer overrides
    pub individual_customers: BTreeSet<i64>,
    /// Individual event overrides
    pub individual_events: BTreeSet<i64>,
}

impl ScopeSets {
    fn to_set(ids: &Option<Vec<i64>>) -> BTreeSet<i64> {
        ids.as_deref().unwrap_or_default().iter().copied().collect()
    }

    /// Resolves a [`ScopeSpec`] for a fresh policy: omitted dimensions are empty.
    fn from_spec(spec: &ScopeSpec) -> Self {
        Self {
            item_groups: Self::to_set(&spec.item_groups),
            customer_groups: Self::to_set(&spec.customer_groups),
            event_groups: Self::to_set(&spec.event_groups),
            payment_methods: Self::to_set(&spec.payment_methods),
            vendors: Self::to_set(&spec.vendors),
            individual_items: Self::to_set(&spec.individual_items),
            individual_customers: Self::to_set(&spec.individual_customers),
            individual_events: Self::to_set(&spec.individual_events),
        }
    }

    /// Overlays provided dimensions of `spec` on top of these stored sets,
    /// yielding the scope a partial update would result in.
    fn merged_with(&self, spec: &ScopeSpec) -> Self {
        let pick = |provided: &Option<Vec<i64>>, stored: &BTreeSet<i64>| {
            provided
                .as_deref()
                .map_or_else(|| stored.clone(), |ids| ids.iter().copied().collect())
        };
        Self {
            item_groups: pick(&spec.item_groups, &self.item_groups),
            customer_groups: pick(&spec.customer_groups, &self.customer_groups),
            event_groups: pick(&spec.event_groups, &self.event_groups),
            payment_methods: pick(&spec.payment_methods, &self.payment_methods),
            vendors: pick(&spec.vendors, &self.vendors),
            individual_items: pick(&spec.individual_items, &self.individual_items),
            individual_customers: pick(&spec.individual_customers, &self.individual_customers),
            individual_events: pick(&spec.individual_events, &self.individual_events),
        }
    }

    /// True when none of the six entity dimensions names anything.
    fn entity_scope_is_empty(&self) -> bool {
        self.item_groups.is_empty()
            && self.customer_groups.is_empty()
            && self.event_groups.is_empty()
            && self.individual_items.is_empty()
            && self.individual_customers.is_empty()
            && self.individual_events.is_empty()
    }
}

/// A policy together with its resolved scope relation id sets.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyWithScope {
    /// The policy row
    pub policy: policy::Model,
    /// All eight relation id sets
    pub scope: ScopeSets,
}

/// Validates a policy spec against its resolved scope.
///
/// Messages are administrator-facing and name the specific rule that failed.
fn validate(spec: &PolicySpec, scope: &ScopeSets) -> Result<()> {
    if !(spec.budget_amount.is_finite() && spec.budget_amount > 0.0) {
        return Err(Error::validation("budget amount must be positive"));
    }

    if let Some(end) = spec.budget_end_date {
        if end <= spec.budget_start_date {
            return Err(Error::validation(
                "budget end date must be after the start date",
            ));
        }
    }

    match (spec.require_approval, spec.approval_threshold) {
        (true, None) => {
            return Err(Error::validation(
                "an approval threshold is required when approval is enabled",
            ));
        }
        (true, Some(threshold)) if !(threshold.is_finite() && threshold > 0.0) => {
            return Err(Error::validation("approval threshold must be positive"));
        }
        (false, Some(_)) => {
            return Err(Error::validation(
                "an approval threshold requires approval to be enabled",
            ));
        }
        _ => {}
    }

    if scope.entity_scope_is_empty() {
        return Err(Error::validation(
            "policy must be scoped to at least one group or individual entity",
        ));
    }
    if scope.vendors.is_empty() {
        return Err(Error::validation("at least one vendor must be selected"));
    }
    if scope.payment_methods.is_empty() {
        return Err(Error::validation(
            "at least one payment method must be selected",
        ));
    }

    Ok(())
}

/// Encodes the payment type tags as the comma-joined column value, deduplicated.
fn encode_payment_types(tags: &[PaymentType]) -> String {
    let mut seen: Vec<PaymentType> = Vec::new();
    for tag in tags {
        if !seen.contains(tag) {
            seen.push(*tag);
        }
    }
    seen.iter()
        .map(sea_orm::ActiveEnum::to_value)
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes a policy row's `allowed_payment_types` column back into tags.
pub fn decode_payment_types(raw: &str) -> Result<Vec<PaymentType>> {
    raw.split(',')
        .filter(|tag| !tag.is_empty())
        .map(|tag| PaymentType::try_from_value(&tag.to_string()).map_err(Into::into))
        .collect()
}

// One replace/load pair per scope relation table. Replace deletes the policy's
// existing rows for the dimension and inserts the new set.
macro_rules! scope_dimension {
    ($replace_fn:ident, $load_fn:ident, $join:ident, $field:ident) => {
        async fn $replace_fn<C: ConnectionTrait>(
            db: &C,
            policy_id: i64,
            ids: &BTreeSet<i64>,
        ) -> Result<()> {
            $join::Entity::delete_many()
                .filter($join::Column::PolicyId.eq(policy_id))
                .exec(db)
                .await?;
            for id in ids {
                $join::ActiveModel {
                    policy_id: Set(policy_id),
                    $field: Set(*id),
                }
                .insert(db)
                .await?;
            }
            Ok(())
        }

        async fn $load_fn<C: ConnectionTrait>(db: &C, policy_id: i64) -> Result<BTreeSet<i64>> {
            Ok($join::Entity::find()
                .filter($join::Column::PolicyId.eq(policy_id))
                .all(db)
                .await?
                .into_iter()
                .map(|row| row.$field)
                .collect())
        }
    };
}

scope_dimension!(replace_item_groups, load_item_groups, policy_item_group, item_group_id);
scope_dimension!(
    replace_customer_groups,
    load_customer_groups,
    policy_customer_group,
    customer_group_id
);
scope_dimension!(replace_event_groups, load_event_groups, policy_event_group, event_group_id);
scope_dimension!(
    replace_payment_methods,
    load_payment_methods,
    policy_payment_method,
    payment_method_id
);
scope_dimension!(replace_vendors, load_vendors, policy_vendor, vendor_id);
scope_dimension!(replace_individual_items, load_individual_items, policy_item, item_id);
scope_dimension!(
    replace_individual_customers,
    load_individual_customers,
    policy_customer,
    customer_id
);
scope_dimension!(replace_individual_events, load_individual_events, policy_event, event_id);

// Referential checks: every id a scope names must exist in its catalog table.
macro_rules! ensure_ids_exist {
    ($fn_name:ident, $target:ident, $name:literal) => {
        async fn $fn_name<C: ConnectionTrait>(db: &C, ids: &BTreeSet<i64>) -> Result<()> {
            if ids.is_empty() {
                return Ok(());
            }
            let found: BTreeSet<i64> = $target::Entity::find()
                .filter($target::Column::Id.is_in(ids.iter().copied()))
                .all(db)
                .await?
                .into_iter()
                .map(|row| row.id)
                .collect();
            if let Some(missing) = ids.difference(&found).next() {
                return Err(Error::EntityNotFound {
                    entity: $name,
                    id: *missing,
                });
            }
            Ok(())
        }
    };
}

ensure_ids_exist!(ensure_item_groups_exist, item_group, "item_group");
ensure_ids_exist!(ensure_customer_groups_exist, customer_group, "customer_group");
ensure_ids_exist!(ensure_event_groups_exist, event_group, "event_group");
ensure_ids_exist!(ensure_payment_methods_exist, payment_method, "payment_method");
ensure_ids_exist!(ensure_vendors_exist, vendor, "vendor");
ensure_ids_exist!(ensure_items_exist, item, "item");
ensure_ids_exist!(ensure_customers_exist, customer, "customer");
ensure_ids_exist!(ensure_events_exist, event, "event");

async fn ensure_scope_ids_exist<C: ConnectionTrait>(db: &C, scope: &ScopeSets) -> Result<()> {
    ensure_item_groups_exist(db, &scope.item_groups).await?;
    ensure_customer_groups_exist(db, &scope.customer_groups).await?;
    ensure_event_groups_exist(db, &scope.event_groups).await?;
    ensure_payment_methods_exist(db, &scope.payment_methods).await?;
    ensure_vendors_exist(db, &scope.vendors).await?;
    ensure_items_exist(db, &scope.individual_items).await?;
    ensure_customers_exist(db, &scope.individual_customers).await?;
    ensure_events_exist(db, &scope.individual_events).await?;
    Ok(())
}

async fn write_scope<C: ConnectionTrait>(db: &C, policy_id: i64, scope: &ScopeSets) -> Result<()> {
    replace_item_groups(db, policy_id, &scope.item_groups).await?;
    replace_customer_groups(db, policy_id, &scope.customer_groups).await?;
    replace_event_groups(db, policy_id, &scope.event_groups).await?;
    replace_payment_methods(db, policy_id, &scope.payment_methods).await?;
    replace_vendors(db, policy_id, &scope.vendors).await?;
    replace_individual_items(db, policy_id, &scope.individual_items).await?;
    replace_individual_customers(db, policy_id, &scope.individual_customers).await?;
    replace_individual_events(db, policy_id, &scope.individual_events).await?;
    Ok(())
}

/// Loads all eight relation id sets for a policy.
async fn load_scope<C: ConnectionTrait>(db: &C, policy_id: i64) -> Result<ScopeSets> {
    Ok(ScopeSets {
        item_groups: load_item_groups(db, policy_id).await?,
        customer_groups: load_customer_groups(db, policy_id).await?,
        event_groups: load_event_groups(db, policy_id).await?,
        payment_methods: load_payment_methods(db, policy_id).await?,
        vendors: load_vendors(db, policy_id).await?,
        individual_items: load_individual_items(db, policy_id).await?,
        individual_customers: load_individual_customers(db, policy_id).await?,
        individual_events: load_individual_events(db, policy_id).await?,
    })
}

/// Creates a new policy together with all of its scope relation rows.
///
/// Validation happens before anything is written. The policy row and every
/// relation row go through one database transaction; a failure at any step
/// rolls the whole write back, so no partial policy is ever persisted.
pub async fn create_policy(db: &DatabaseConnection, spec: &PolicySpec) -> Result<PolicyWithScope> {
    let scope = ScopeSets::from_spec(&spec.scope);
    validate(spec, &scope)?;

    let txn = db.begin().await?;

    ensure_scope_ids_exist(&txn, &scope).await?;

    let now = chrono::Utc::now();
    let created = policy::ActiveModel {
        description: Set(spec.description.clone()),
        status: Set(spec.status),
        action: Set(spec.action),
        budget_amount: Set(spec.budget_amount),
        budget_interval: Set(spec.budget_interval),
        budget_start_date: Set(spec.budget_start_date),
        budget_end_date: Set(spec.budget_end_date),
        require_approval: Set(spec.require_approval),
        approval_threshold: Set(spec.approval_threshold),
        allowed_payment_types: Set(encode_payment_types(&spec.allowed_payment_types)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    write_scope(&txn, created.id, &scope).await?;

    txn.commit().await?;

    Ok(PolicyWithScope {
        policy: created,
        scope,
    })
}

/// Updates an existing policy and replaces every provided relation set.
///
/// Scalar fields are always rewritten. Relation dimensions omitted from the
/// spec are left untouched; dimensions present but empty are cleared. The
/// resulting (merged) scope must still satisfy the creation invariants. The
/// policy row and all relation rewrites share one database transaction, so
/// concurrent readers never see a partially replaced scope.
pub async fn update_policy(
    db: &DatabaseConnection,
    id: i64,
    spec: &PolicySpec,
) -> Result<PolicyWithScope> {
    let txn = db.begin().await?;

    let existing = policy::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(Error::PolicyNotFound { id })?;

    let stored = load_scope(&txn, id).await?;
    let effective = stored.merged_with(&spec.scope);
    validate(spec, &effective)?;
    ensure_scope_ids_exist(&txn, &effective).await?;

    let mut active: policy::ActiveModel = existing.into();
    active.description = Set(spec.description.clone());
    active.status = Set(spec.status);
    active.action = Set(spec.action);
    active.budget_amount = Set(spec.budget_amount);
    active.budget_interval = Set(spec.budget_interval);
    active.budget_start_date = Set(spec.budget_start_date);
    active.budget_end_date = Set(spec.budget_end_date);
    active.require_approval = Set(spec.require_approval);
    active.approval_threshold = Set(spec.approval_threshold);
    active.allowed_payment_types = Set(encode_payment_types(&spec.allowed_payment_types));
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(&txn).await?;

    if spec.scope.item_groups.is_some() {
        replace_item_groups(&txn, id, &effective.item_groups).await?;
    }
    if spec.scope.customer_groups.is_some() {
        replace_customer_groups(&txn, id, &effective.customer_groups).await?;
    }
    if spec.scope.event_groups.is_some() {
        replace_event_groups(&txn, id, &effective.event_groups).await?;
    }
    if spec.scope.payment_methods.is_some() {
        replace_payment_methods(&txn, id, &effective.payment_methods).await?;
    }
    if spec.scope.vendors.is_some() {
        replace_vendors(&txn, id, &effective.vendors).await?;
    }
    if spec.scope.individual_items.is_some() {
        replace_individual_items(&txn, id, &effective.individual_items).await?;
    }
    if spec.scope.individual_customers.is_some() {
        replace_individual_customers(&txn, id, &effective.individual_customers).await?;
    }
    if spec.scope.individual_events.is_some() {
        replace_individual_events(&txn, id, &effective.individual_events).await?;
    }

    txn.commit().await?;

    Ok(PolicyWithScope {
        policy: updated,
        scope: effective,
    })
}

/// Deletes a policy and all of its relation rows, atomically and physically.
///
/// Relation tables are purged in a fixed order before the policy row so that
/// engines enforcing foreign keys never see a dangling reference.
pub async fn delete_policy(db: &DatabaseConnection, id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let existing = policy::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(Error::PolicyNotFound { id })?;

    policy_item_group::Entity::delete_many()
        .filter(policy_item_group::Column::PolicyId.eq(id))
        .exec(&txn)
        .await?;
    policy_customer_group::Entity::delete_many()
        .filter(policy_customer_group::Column::PolicyId.eq(id))
        .exec(&txn)
        .await?;
    policy_event_group::Entity::delete_many()
        .filter(policy_event_group::Column::PolicyId.eq(id))
        .exec(&txn)
        .await?;
    policy_payment_method::Entity::delete_many()
        .filter(policy_payment_method::Column::PolicyId.eq(id))
        .exec(&txn)
        .await?;
    policy_vendor::Entity::delete_many()
        .filter(policy_vendor::Column::PolicyId.eq(id))
        .exec(&txn)
        .await?;
    policy_item::Entity::delete_many()
        .filter(policy_item::Column::PolicyId.eq(id))
        .exec(&txn)
        .await?;
    policy_customer::Entity::delete_many()
        .filter(policy_customer::Column::PolicyId.eq(id))
        .exec(&txn)
        .await?;
    policy_event::Entity::delete_many()
        .filter(policy_event::Column::PolicyId.eq(id))
        .exec(&txn)
        .await?;

    // Consumption buckets reference the policy row too
    consumption::Entity::delete_many()
        .filter(consumption::Column::PolicyId.eq(id))
        .exec(&txn)
        .await?;

    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Returns a policy plus all of its resolved relation id sets.
pub async fn get_policy(db: &DatabaseConnection, id: i64) -> Result<PolicyWithScope> {
    let found = policy::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::PolicyNotFound { id })?;
    let scope = load_scope(db, id).await?;
    Ok(PolicyWithScope {
        policy: found,
        scope,
    })
}

/// Returns all active policies with their scopes, ordered by id so a single
/// decision always sees the same policy order.
pub async fn list_active_policies(db: &DatabaseConnection) -> Result<Vec<PolicyWithScope>> {
    let rows = policy::Entity::find()
        .filter(policy::Column::Status.eq(PolicyStatus::Active))
        .order_by_asc(policy::Column::Id)
        .all(db)
        .await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let scope = load_scope(db, row.id).await?;
        out.push(PolicyWithScope { policy: row, scope });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{setup_world, test_policy_spec};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn spec_with_scope(base: &PolicySpec, scope: ScopeSpec) -> PolicySpec {
        PolicySpec {
            scope,
            ..base.clone()
        }
    }

    #[tokio::test]
    async fn test_create_policy_rejects_empty_vendor_scope() -> Result<()> {
        let world = setup_world().await?;
        let mut spec = test_policy_spec(&world);
        spec.scope.vendors = Some(vec![]);

        let result = create_policy(&world.db, &spec).await;
        match result.unwrap_err() {
            Error::Validation { message } => {
                assert_eq!(message, "at least one vendor must be selected");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_create_policy_rejects_empty_payment_method_scope() -> Result<()> {
        let world = setup_world().await?;
        let mut spec = test_policy_spec(&world);
        spec.scope.payment_methods = None;

        let result = create_policy(&world.db, &spec).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_policy_rejects_empty_entity_scope() -> Result<()> {
        let world = setup_world().await?;
        let base = test_policy_spec(&world);
        let spec = spec_with_scope(
            &base,
            ScopeSpec {
                vendors: Some(vec![world.vendor.id]),
                payment_methods: Some(vec![world.payment_method.id]),
                ..ScopeSpec::default()
            },
        );

        let result = create_policy(&world.db, &spec).await;
        match result.unwrap_err() {
            Error::Validation { message } => {
                assert_eq!(
                    message,
                    "policy must be scoped to at least one group or individual entity"
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_create_policy_validates_before_touching_storage() -> Result<()> {
        // A mock with no prepared results: any query would fail, so reaching
        // the database at all would surface as a Database error instead.
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let world = setup_world().await?;
        let mut spec = test_policy_spec(&world);
        spec.budget_amount = -5.0;

        let result = create_policy(&db, &spec).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_policy_rejects_threshold_without_approval() -> Result<()> {
        let world = setup_world().await?;
        let mut spec = test_policy_spec(&world);
        spec.require_approval = false;
        spec.approval_threshold = Some(100.0);

        assert!(matches!(
            create_policy(&world.db, &spec).await.unwrap_err(),
            Error::Validation { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_policy_rejects_end_before_start() -> Result<()> {
        let world = setup_world().await?;
        let mut spec = test_policy_spec(&world);
        spec.budget_end_date = Some(spec.budget_start_date);

        assert!(matches!(
            create_policy(&world.db, &spec).await.unwrap_err(),
            Error::Validation { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_policy_roundtrip() -> Result<()> {
        let world = setup_world().await?;
        let mut spec = test_policy_spec(&world);
        spec.allowed_payment_types = vec![PaymentType::Card, PaymentType::Ach, PaymentType::Card];

        let created = create_policy(&world.db, &spec).await?;
        assert!(created.scope.customer_groups.contains(&world.customer_group.id));
        assert!(created.scope.vendors.contains(&world.vendor.id));
        assert_eq!(created.policy.allowed_payment_types, "card,ach");
        assert_eq!(
            decode_payment_types(&created.policy.allowed_payment_types)?,
            vec![PaymentType::Card, PaymentType::Ach]
        );

        let fetched = get_policy(&world.db, created.policy.id).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_policy_unknown_group_leaves_nothing_behind() -> Result<()> {
        let world = setup_world().await?;
        let mut spec = test_policy_spec(&world);
        spec.scope.customer_groups = Some(vec![world.customer_group.id, 9999]);

        let result = create_policy(&world.db, &spec).await;
        match result.unwrap_err() {
            Error::EntityNotFound { entity, id } => {
                assert_eq!(entity, "customer_group");
                assert_eq!(id, 9999);
            }
            other => panic!("expected EntityNotFound, got {other:?}"),
        }

        // The rolled-back transaction must not have persisted a policy row.
        let rows = policy::Entity::find().all(&world.db).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_policy_replaces_provided_dimensions() -> Result<()> {
        let world = setup_world().await?;
        let spec = test_policy_spec(&world);
        let created = create_policy(&world.db, &spec).await?;

        let mut update = spec.clone();
        update.scope = ScopeSpec {
            // Switch the customer dimension to an individual override and
            // leave every other dimension untouched.
            customer_groups: Some(vec![]),
            individual_customers: Some(vec![world.outsider.id]),
            ..ScopeSpec::default()
        };

        let updated = update_policy(&world.db, created.policy.id, &update).await?;
        assert!(updated.scope.customer_groups.is_empty());
        assert!(updated.scope.individual_customers.contains(&world.outsider.id));
        // Untouched dimensions survive
        assert_eq!(updated.scope.vendors, created.scope.vendors);
        assert_eq!(updated.scope.payment_methods, created.scope.payment_methods);
        assert!(updated.policy.updated_at >= created.policy.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_policy_is_idempotent() -> Result<()> {
        let world = setup_world().await?;
        let spec = test_policy_spec(&world);
        let created = create_policy(&world.db, &spec).await?;

        let first = update_policy(&world.db, created.policy.id, &spec).await?;
        let second = update_policy(&world.db, created.policy.id, &spec).await?;
        assert_eq!(first.scope, second.scope);

        let fetched = get_policy(&world.db, created.policy.id).await?;
        assert_eq!(fetched.scope, second.scope);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_policy_rejects_clearing_all_entity_dimensions() -> Result<()> {
        let world = setup_world().await?;
        let spec = test_policy_spec(&world);
        let created = create_policy(&world.db, &spec).await?;

        let mut update = spec.clone();
        update.scope = ScopeSpec {
            customer_groups: Some(vec![]),
            ..ScopeSpec::default()
        };

        // The only populated entity dimension was customer groups; clearing it
        // must fail against the merged scope.
        assert!(matches!(
            update_policy(&world.db, created.policy.id, &update)
                .await
                .unwrap_err(),
            Error::Validation { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_policy_not_found() -> Result<()> {
        let world = setup_world().await?;
        let spec = test_policy_spec(&world);

        assert!(matches!(
            update_policy(&world.db, 424_242, &spec).await.unwrap_err(),
            Error::PolicyNotFound { id: 424_242 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_policy_purges_relations() -> Result<()> {
        let world = setup_world().await?;
        let spec = test_policy_spec(&world);
        let created = create_policy(&world.db, &spec).await?;
        let id = created.policy.id;

        delete_policy(&world.db, id).await?;

        assert!(matches!(
            get_policy(&world.db, id).await.unwrap_err(),
            Error::PolicyNotFound { .. }
        ));
        let leftovers = policy_customer_group::Entity::find()
            .filter(policy_customer_group::Column::PolicyId.eq(id))
            .all(&world.db)
            .await?;
        assert!(leftovers.is_empty());

        // Deleting again reports NotFound
        assert!(matches!(
            delete_policy(&world.db, id).await.unwrap_err(),
            Error::PolicyNotFound { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_active_policies_filters_and_orders() -> Result<()> {
        let world = setup_world().await?;
        let mut spec = test_policy_spec(&world);

        let first = create_policy(&world.db, &spec).await?;
        spec.status = PolicyStatus::Draft;
        let _draft = create_policy(&world.db, &spec).await?;
        spec.status = PolicyStatus::Active;
        let second = create_policy(&world.db, &spec).await?;

        let active = list_active_policies(&world.db).await?;
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].policy.id, first.policy.id);
        assert_eq!(active[1].policy.id, second.policy.id);
        Ok(())
    }
}

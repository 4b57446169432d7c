//! Scope resolver - Decides whether a transaction falls inside a policy's scope.
//!
//! Matching is purely in-memory over the already-loaded scope sets. Per entity
//! dimension the group set and the individual set are alternatives (OR); the
//! five dimensions themselves are conjunctive (AND). A dimension a policy does
//! not scope at all is unconstrained; an entity with no group assignment can
//! only match through the individual set, never vacuously.

use std::collections::BTreeSet;

use crate::core::policy::PolicyWithScope;

/// A candidate transaction's entity ids with group memberships resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeTarget {
    /// Customer being charged
    pub customer_id: i64,
    /// The customer's group, if any
    pub customer_group_id: Option<i64>,
    /// Item being purchased
    pub item_id: i64,
    /// The item's group, if any
    pub item_group_id: Option<i64>,
    /// Event the purchase happens under
    pub event_id: i64,
    /// The event's group, if any
    pub event_group_id: Option<i64>,
    /// Vendor the purchase is placed with
    pub vendor_id: i64,
    /// Payment method used
    pub payment_method_id: i64,
}

/// One entity dimension: in the individual set, or in a scoped group.
///
/// Both sets empty means the policy does not constrain this dimension.
fn dimension_matches(
    groups: &BTreeSet<i64>,
    individuals: &BTreeSet<i64>,
    entity_id: i64,
    group_id: Option<i64>,
) -> bool {
    if groups.is_empty() && individuals.is_empty() {
        return true;
    }
    individuals.contains(&entity_id) || group_id.is_some_and(|id| groups.contains(&id))
}

/// Returns true when the transaction lies inside the policy's declared scope.
///
/// All five dimensions must hold simultaneously; there is no OR across
/// dimensions. Vendor and payment method are strict allow-list membership
/// (validation guarantees they are never empty on a stored policy).
pub fn matches(policy: &PolicyWithScope, target: &ScopeTarget) -> bool {
    let scope = &policy.scope;

    dimension_matches(
        &scope.item_groups,
        &scope.individual_items,
        target.item_id,
        target.item_group_id,
    ) && dimension_matches(
        &scope.customer_groups,
        &scope.individual_customers,
        target.customer_id,
        target.customer_group_id,
    ) && dimension_matches(
        &scope.event_groups,
        &scope.individual_events,
        target.event_id,
        target.event_group_id,
    ) && scope.vendors.contains(&target.vendor_id)
        && scope.payment_methods.contains(&target.payment_method_id)
}

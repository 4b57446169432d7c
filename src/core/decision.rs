//! Decision engine - Evaluates a candidate transaction against active policies.
//!
//! Evaluation is synchronous request/response: fetch the active policy set,
//! filter by temporal window and scope, then combine verdicts under deny-wins
//! semantics. Consumption is only recorded on a final allow, and all matched
//! policies record inside one database transaction, so a lost budget race
//! rolls the whole recording back into a block.

use crate::{
    core::{
        budget,
        policy::{PolicyWithScope, list_active_policies},
        scope::{self, ScopeTarget},
    },
    entities::{Customer, Event, Item, policy::PolicyAction},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use tracing::{debug, warn};

/// Final verdict for a candidate transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Permitted; consumption has been recorded against all matched policies
    Allow,
    /// Rejected, either by a block policy or by budget exhaustion
    Block,
    /// Permitted in principle but above an approval threshold; nothing recorded
    PendingApproval,
}

/// The decision for one evaluated transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Final verdict
    pub outcome: Outcome,
    /// Ids of every policy whose scope and temporal window matched
    pub matched_policies: Vec<i64>,
}

impl Decision {
    fn blocked(matched_policies: Vec<i64>) -> Self {
        Self {
            outcome: Outcome::Block,
            matched_policies,
        }
    }
}

/// A proposed transaction, passed explicitly by the caller.
#[derive(Debug, Clone)]
pub struct CandidateTransaction {
    /// Customer being charged
    pub customer_id: i64,
    /// Item being purchased
    pub item_id: i64,
    /// Event the purchase happens under
    pub event_id: i64,
    /// Vendor the purchase is placed with
    pub vendor_id: i64,
    /// Payment method used
    pub payment_method_id: i64,
    /// Transaction amount in dollars, must be positive
    pub amount: f64,
    /// ISO currency code, carried through to the ledger
    pub currency: String,
    /// When the transaction happens
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Evaluates a candidate transaction against all active policies.
///
/// Storage failures fail closed: when the policy set cannot be fully
/// retrieved the transaction is blocked, because the open-world default-allow
/// is only sound for a complete policy set. Invalid amounts are the caller's
/// bug and surface as errors instead.
pub async fn evaluate(db: &DatabaseConnection, txn: &CandidateTransaction) -> Result<Decision> {
    if !(txn.amount.is_finite() && txn.amount > 0.0) {
        return Err(Error::InvalidAmount { amount: txn.amount });
    }

    match evaluate_inner(db, txn).await {
        Ok(decision) => Ok(decision),
        Err(Error::Database(err)) => {
            warn!(error = %err, "policy evaluation hit storage failure; failing closed");
            Ok(Decision::blocked(Vec::new()))
        }
        Err(other) => Err(other),
    }
}

async fn evaluate_inner(db: &DatabaseConnection, txn: &CandidateTransaction) -> Result<Decision> {
    let policies = list_active_policies(db).await?;
    let target = resolve_target(db, txn).await?;

    let matched: Vec<&PolicyWithScope> = policies
        .iter()
        .filter(|p| budget::period_index(&p.policy, txn.timestamp).is_some())
        .filter(|p| scope::matches(p, &target))
        .collect();

    // No policy claims this transaction: open-world default-allow.
    if matched.is_empty() {
        return Ok(Decision {
            outcome: Outcome::Allow,
            matched_policies: Vec::new(),
        });
    }

    let matched_ids: Vec<i64> = matched.iter().map(|p| p.policy.id).collect();

    // Deny-wins: any matching block policy settles it.
    if matched
        .iter()
        .any(|p| p.policy.action == PolicyAction::Block)
    {
        debug!(matched = ?matched_ids, "transaction blocked by policy action");
        return Ok(Decision::blocked(matched_ids));
    }

    // Every applicable allow policy must have headroom; exhaustion is itself
    // a block condition, not a silent pass.
    for p in &matched {
        let Some(index) = budget::period_index(&p.policy, txn.timestamp) else {
            continue;
        };
        if budget::remaining_budget(db, &p.policy, index).await? < txn.amount {
            debug!(
                policy_id = p.policy.id,
                period_index = index,
                "transaction blocked by budget exhaustion"
            );
            return Ok(Decision::blocked(matched_ids));
        }
    }

    // Approval gate: above any matched policy's threshold means a human
    // decides, and nothing is consumed yet.
    if matched.iter().any(|p| {
        p.policy.require_approval
            && p.policy
                .approval_threshold
                .is_some_and(|threshold| txn.amount > threshold)
    }) {
        return Ok(Decision {
            outcome: Outcome::PendingApproval,
            matched_policies: matched_ids,
        });
    }

    // Final allow: record consumption for every matched policy in one
    // database transaction. A concurrent evaluation may have consumed the
    // headroom since the check above; the guarded increment then refuses and
    // the whole recording rolls back into a block.
    let recorder = db.begin().await?;
    for p in &matched {
        let Some(index) = budget::period_index(&p.policy, txn.timestamp) else {
            continue;
        };
        match budget::record_consumption(&recorder, &p.policy, index, txn.amount).await {
            Ok(()) => {}
            Err(Error::BudgetExceeded {
                policy_id,
                period_index,
                ..
            }) => {
                recorder.rollback().await?;
                debug!(
                    policy_id,
                    period_index, "transaction blocked by concurrent budget consumption"
                );
                return Ok(Decision::blocked(matched_ids));
            }
            Err(other) => return Err(other),
        }
    }
    recorder.commit().await?;

    Ok(Decision {
        outcome: Outcome::Allow,
        matched_policies: matched_ids,
    })
}

/// Resolves the transaction's entity ids into a scope target with group
/// memberships attached. Unknown entities resolve to "no group": they can
/// still match through individual overrides.
async fn resolve_target(
    db: &DatabaseConnection,
    txn: &CandidateTransaction,
) -> Result<ScopeTarget> {
    let customer_group_id = Customer::find_by_id(txn.customer_id)
        .one(db)
        .await?
        .and_then(|c| c.group_id);
    let item_group_id = Item::find_by_id(txn.item_id)
        .one(db)
        .await?
        .and_then(|i| i.group_id);
    let event_group_id = Event::find_by_id(txn.event_id)
        .one(db)
        .await?
        .and_then(|e| e.group_id);

    Ok(ScopeTarget {
        customer_id: txn.customer_id,
        customer_group_id,
        item_id: txn.item_id,
        item_group_id,
        event_id: txn.event_id,
        event_group_id,
        vendor_id: txn.vendor_id,
        payment_method_id: txn.payment_method_id,
    })
}

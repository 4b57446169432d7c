//! Core business logic for the policy engine.
//!
//! Framework-agnostic operations over the entity layer: the policy store,
//! catalog and group management, scope resolution, budget-interval tracking,
//! and the transaction decision engine. All async functions take a database
//! connection and return [`crate::errors::Result`].

/// Budget tracker - period indexing and guarded consumption recording
pub mod budget;
/// Catalog management - customers, items, events, vendors, payment methods
pub mod catalog;
/// Decision engine - evaluates a candidate transaction against active policies
pub mod decision;
/// Group management - the three group types with uniform deletion guards
pub mod group;
/// Policy store - atomic policy + scope-relation persistence
pub mod policy;
/// Scope resolver - pure matching of a transaction against a policy's scope
pub mod scope;

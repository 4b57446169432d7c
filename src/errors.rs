//! Unified error types for the policy engine.
//!
//! All fallible operations in the crate return [`Result`], backed by a single
//! [`Error`] enum. Validation failures carry the specific message shown to the
//! administrator; storage failures wrap the underlying `SeaORM` error.

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// A policy spec violated a validation rule (never silently coerced)
    #[error("Validation error: {message}")]
    Validation {
        /// Specific rule that failed, e.g. "at least one vendor must be selected"
        message: String,
    },

    /// A uniqueness or referential constraint was violated
    #[error("Conflict: {message}")]
    Conflict {
        /// What conflicted, e.g. a duplicate group name or an in-use group
        message: String,
    },

    /// No policy exists with the given id
    #[error("Policy not found: {id}")]
    PolicyNotFound {
        /// The unknown policy id
        id: i64,
    },

    /// A referenced catalog entity (group, vendor, payment method, member) does not exist
    #[error("{entity} not found: {id}")]
    EntityNotFound {
        /// Table-level name of the missing entity, e.g. "customer_group"
        entity: &'static str,
        /// The unknown id
        id: i64,
    },

    /// A monetary amount was zero, negative, or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Recording consumption would push a budget period over its ceiling.
    /// Surfaced only from the budget tracker to the decision engine, which
    /// converts it into a block decision.
    #[error("Budget exceeded for policy {policy_id} in period {period_index}: requested {requested}")]
    BudgetExceeded {
        /// Policy whose budget was exhausted
        policy_id: i64,
        /// Budget-interval occurrence that lacked headroom
        period_index: i64,
        /// Amount that could not be consumed
        requested: f64,
    },

    /// Configuration error (environment, database URL, startup)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::Conflict`] with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

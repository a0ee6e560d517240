//! Typed errors for the ticket tracker core.
//!
//! Commands and storage return `anyhow::Result`; the typed errors defined
//! here travel inside those results so that boundaries (CLI exit codes,
//! HTTP status mapping) can recover the category with `downcast_ref`.

use thiserror::Error;

use crate::domain::Status;

/// A business-rule failure raised by entity operations.
///
/// `Validation` covers field constraints (length, emptiness); a structurally
/// valid input that violates a workflow rule surfaces as `InvalidTransition`
/// so callers can tell bad input shape from workflow conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input failed a field constraint
    #[error("{field} {reason}")]
    Validation {
        /// Field that failed
        field: &'static str,
        /// Why it failed
        reason: String,
    },

    /// Requested status change is not in the transition table
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the ticket is in
        from: Status,
        /// Status that was requested
        to: Status,
    },
}

impl DomainError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// A referenced entity does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} not found: {id}")]
pub struct NotFound {
    /// Entity kind ("project" or "ticket")
    pub kind: &'static str,
    /// The id or prefix that failed to resolve
    pub id: String,
}

impl NotFound {
    pub fn project(id: impl Into<String>) -> Self {
        NotFound {
            kind: "project",
            id: id.into(),
        }
    }

    pub fn ticket(id: impl Into<String>) -> Self {
        NotFound {
            kind: "ticket",
            id: id.into(),
        }
    }
}

/// The persisted version changed between load and save.
///
/// Retryable: reload the entity, reapply the mutation, save again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ticket {id} was modified concurrently (version {expected} loaded, {actual} stored)")]
pub struct Conflict {
    /// Ticket that conflicted
    pub id: String,
    /// Version the caller loaded
    pub expected: u64,
    /// Version found in storage at save time
    pub actual: u64,
}

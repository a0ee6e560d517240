//! Command execution logic for all tracker operations.
//!
//! The `CommandExecutor` owns the storage backend and carries the business
//! workflow: it resolves entity references, invokes domain operations,
//! persists the result, and appends the returned facts to the event log.
//!
//! Submodules by functional area:
//! - `project`: project creation and listing
//! - `ticket`: ticket lifecycle operations and queries
//! - `events`: fact log access

mod events;
mod project;
mod ticket;

use crate::storage::TicketStore;
use anyhow::Result;

/// Executes tracker commands against a storage backend.
///
/// Generic over storage to support different implementations (JSON files,
/// in-memory, etc.). Every operation loads a fresh copy of the entity it
/// mutates, applies the change in memory, and saves atomically; the
/// storage's version check turns racing writers into `Conflict` errors.
pub struct CommandExecutor<S: TicketStore> {
    storage: S,
}

impl<S: TicketStore> CommandExecutor<S> {
    /// Create a new command executor with the given storage
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Get reference to the storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Initialize a new desk repository
    pub fn init(&self) -> Result<()> {
        self.storage.init()
    }
}

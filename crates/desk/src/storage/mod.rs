//! Storage abstraction layer for persisting projects, tickets, and facts.
//!
//! The `TicketStore` trait decouples the command layer from the concrete
//! backend. Two implementations ship with the crate: JSON files on disk and
//! an in-memory store for tests.

use anyhow::{anyhow, Result};

use crate::domain::{Fact, Project, Ticket};
use crate::errors::NotFound;

pub mod json;
pub mod memory;

pub use json::JsonFileStorage;
pub use memory::InMemoryStorage;

/// Minimum length of a partial id accepted by the resolve operations.
const MIN_PREFIX_LEN: usize = 4;

/// Trait for storage backends that persist projects, tickets, and facts.
///
/// Implementations must be `Clone`; clones observe the same underlying
/// data. Each mutation call persists one whole aggregate atomically.
///
/// # Examples
///
/// ```
/// use desk::domain::{Priority, Project, Ticket};
/// use desk::storage::{InMemoryStorage, TicketStore};
///
/// let storage = InMemoryStorage::new();
/// storage.init().unwrap();
///
/// let project = Project::create("Payments", "PAY").unwrap();
/// storage.save_project(&project).unwrap();
///
/// let mut ticket =
///     Ticket::create(project.id(), "Fix login bug", None, Priority::Medium).unwrap();
/// storage.save_ticket(&mut ticket).unwrap();
///
/// let loaded = storage.load_ticket(ticket.id()).unwrap();
/// assert_eq!(loaded.title(), "Fix login bug");
/// ```
pub trait TicketStore: Clone {
    /// Initialize the backend (idempotent).
    fn init(&self) -> Result<()>;

    /// Save a project (create or update).
    fn save_project(&self, project: &Project) -> Result<()>;

    /// Load a project by full id.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no such project exists.
    fn load_project(&self, id: &str) -> Result<Project>;

    /// List all projects, in no particular order.
    fn list_projects(&self) -> Result<Vec<Project>>;

    /// Delete a project and every ticket belonging to it.
    fn delete_project(&self, id: &str) -> Result<()>;

    /// Save a ticket, enforcing the optimistic-concurrency check.
    ///
    /// The ticket's version must equal the stored version; on success the
    /// version is bumped and the new state persisted. A mismatch returns
    /// [`crate::errors::Conflict`] and persists nothing.
    fn save_ticket(&self, ticket: &mut Ticket) -> Result<()>;

    /// Load a ticket by full id.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no such ticket exists.
    fn load_ticket(&self, id: &str) -> Result<Ticket>;

    /// List all tickets belonging to a project, in no particular order.
    fn list_tickets(&self, project_id: &str) -> Result<Vec<Ticket>>;

    /// Delete a ticket by full id.
    fn delete_ticket(&self, id: &str) -> Result<()>;

    /// Resolve a full id or unique prefix (>= 4 chars) to a project id.
    fn resolve_project_id(&self, partial: &str) -> Result<String>;

    /// Resolve a full id or unique prefix (>= 4 chars) to a ticket id.
    fn resolve_ticket_id(&self, partial: &str) -> Result<String>;

    /// Append a fact to the event log.
    fn append_fact(&self, fact: &Fact) -> Result<()>;

    /// Read the full event log, oldest first.
    fn read_facts(&self) -> Result<Vec<Fact>>;
}

/// Resolve a partial id against a set of known ids.
///
/// Accepts a full id or a unique prefix of at least [`MIN_PREFIX_LEN`]
/// characters. Shared by every backend so prefix semantics cannot drift.
pub(crate) fn resolve_partial_id<'a, I>(kind: &'static str, partial: &str, ids: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let ids: Vec<&str> = ids.into_iter().collect();

    if ids.iter().any(|id| *id == partial) {
        return Ok(partial.to_string());
    }

    if partial.len() < MIN_PREFIX_LEN {
        return Err(anyhow!(
            "{} id prefix must be at least {} characters: {}",
            kind,
            MIN_PREFIX_LEN,
            partial
        ));
    }

    let matches: Vec<&str> = ids
        .iter()
        .filter(|id| id.starts_with(partial))
        .copied()
        .collect();

    match matches.len() {
        0 => Err(match kind {
            "project" => NotFound::project(partial).into(),
            _ => NotFound::ticket(partial).into(),
        }),
        1 => Ok(matches[0].to_string()),
        _ => Err(anyhow!(
            "ambiguous {} id '{}' matches multiple entries: {}",
            kind,
            partial,
            matches.join(", ")
        )),
    }
}

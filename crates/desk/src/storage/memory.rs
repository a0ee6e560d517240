//! In-memory storage implementation.
//!
//! Stores everything in RAM behind an `Arc<RwLock>`, so clones share the
//! same data and the store can be used from the async server as well as
//! tests. All data is lost when the last clone is dropped.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::{Fact, Project, Ticket};
use crate::errors::{Conflict, NotFound};
use crate::storage::{resolve_partial_id, TicketStore};

#[derive(Default)]
struct Inner {
    projects: HashMap<String, Project>,
    tickets: HashMap<String, Ticket>,
    facts: Vec<Fact>,
}

/// In-memory storage backend.
///
/// # Examples
///
/// ```
/// use desk::domain::Project;
/// use desk::storage::{InMemoryStorage, TicketStore};
///
/// let storage = InMemoryStorage::new();
/// storage.init().unwrap();
///
/// let project = Project::create("Payments", "PAY").unwrap();
/// storage.save_project(&project).unwrap();
/// assert_eq!(storage.list_projects().unwrap().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStorage {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| anyhow!("storage lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| anyhow!("storage lock poisoned"))
    }
}

impl TicketStore for InMemoryStorage {
    fn init(&self) -> Result<()> {
        // Nothing to set up for the in-memory backend
        Ok(())
    }

    fn save_project(&self, project: &Project) -> Result<()> {
        self.write()?
            .projects
            .insert(project.id().to_string(), project.clone());
        Ok(())
    }

    fn load_project(&self, id: &str) -> Result<Project> {
        self.read()?
            .projects
            .get(id)
            .cloned()
            .ok_or_else(|| NotFound::project(id).into())
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.read()?.projects.values().cloned().collect())
    }

    fn delete_project(&self, id: &str) -> Result<()> {
        let mut inner = self.write()?;
        inner
            .projects
            .remove(id)
            .ok_or_else(|| anyhow::Error::from(NotFound::project(id)))?;
        inner.tickets.retain(|_, t| t.project_id() != id);
        Ok(())
    }

    fn save_ticket(&self, ticket: &mut Ticket) -> Result<()> {
        let mut inner = self.write()?;
        if let Some(stored) = inner.tickets.get(ticket.id()) {
            if stored.version() != ticket.version() {
                return Err(Conflict {
                    id: ticket.id().to_string(),
                    expected: ticket.version(),
                    actual: stored.version(),
                }
                .into());
            }
        }
        ticket.bump_version();
        inner.tickets.insert(ticket.id().to_string(), ticket.clone());
        Ok(())
    }

    fn load_ticket(&self, id: &str) -> Result<Ticket> {
        self.read()?
            .tickets
            .get(id)
            .cloned()
            .ok_or_else(|| NotFound::ticket(id).into())
    }

    fn list_tickets(&self, project_id: &str) -> Result<Vec<Ticket>> {
        Ok(self
            .read()?
            .tickets
            .values()
            .filter(|t| t.project_id() == project_id)
            .cloned()
            .collect())
    }

    fn delete_ticket(&self, id: &str) -> Result<()> {
        self.write()?
            .tickets
            .remove(id)
            .ok_or_else(|| anyhow::Error::from(NotFound::ticket(id)))?;
        Ok(())
    }

    fn resolve_project_id(&self, partial: &str) -> Result<String> {
        let inner = self.read()?;
        resolve_partial_id("project", partial, inner.projects.keys().map(|s| s.as_str()))
    }

    fn resolve_ticket_id(&self, partial: &str) -> Result<String> {
        let inner = self.read()?;
        resolve_partial_id("ticket", partial, inner.tickets.keys().map(|s| s.as_str()))
    }

    fn append_fact(&self, fact: &Fact) -> Result<()> {
        self.write()?.facts.push(fact.clone());
        Ok(())
    }

    fn read_facts(&self) -> Result<Vec<Fact>> {
        Ok(self.read()?.facts.clone())
    }
}

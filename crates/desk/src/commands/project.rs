//! Project creation and listing

use anyhow::Result;

use crate::domain::{Fact, Project};
use crate::storage::TicketStore;

use super::CommandExecutor;

impl<S: TicketStore> CommandExecutor<S> {
    /// Create a project and record the creation fact.
    ///
    /// Name and key are trimmed and validated by the entity; the key is
    /// stored upper-cased. Neither is required to be unique.
    pub fn create_project(&self, name: &str, key: &str) -> Result<Project> {
        let project = Project::create(name, key)?;
        self.storage.save_project(&project)?;
        self.storage.append_fact(&Fact::project_created(&project))?;
        Ok(project)
    }

    /// List all projects, ordered by name ascending (id as tie-break,
    /// since names are not unique).
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let mut projects = self.storage.list_projects()?;
        projects.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
        Ok(projects)
    }

    /// Delete a project and all of its tickets.
    pub fn delete_project(&self, id: &str) -> Result<()> {
        let id = self.storage.resolve_project_id(id)?;
        self.storage.delete_project(&id)
    }
}

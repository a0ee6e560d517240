//! Fact log access

use anyhow::Result;

use crate::domain::Fact;
use crate::storage::TicketStore;

use super::CommandExecutor;

impl<S: TicketStore> CommandExecutor<S> {
    /// Read the full fact log, oldest first.
    pub fn list_facts(&self) -> Result<Vec<Fact>> {
        self.storage.read_facts()
    }

    /// Read the facts concerning one ticket, oldest first.
    pub fn list_facts_for_ticket(&self, ticket_id: &str) -> Result<Vec<Fact>> {
        let ticket_id = self.storage.resolve_ticket_id(ticket_id)?;
        let facts = self.storage.read_facts()?;
        Ok(facts
            .into_iter()
            .filter(|f| f.ticket_id() == Some(ticket_id.as_str()))
            .collect())
    }
}

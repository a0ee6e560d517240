//! Ticket lifecycle operations and queries

use anyhow::Result;

use crate::domain::{Comment, Fact, Priority, Status, Ticket};
use crate::query::{PagedResult, TicketFilter};
use crate::storage::TicketStore;

use super::CommandExecutor;

impl<S: TicketStore> CommandExecutor<S> {
    /// Create a ticket in the given project.
    ///
    /// The project reference is resolved first and must exist; the ticket
    /// factory itself does not check it. On success the creation fact is
    /// appended to the event log.
    pub fn create_ticket(
        &self,
        project_id: &str,
        title: &str,
        description: Option<&str>,
        priority: Priority,
    ) -> Result<Ticket> {
        let project_id = self.storage.resolve_project_id(project_id)?;

        let mut ticket = Ticket::create(&project_id, title, description, priority)?;
        self.storage.save_ticket(&mut ticket)?;
        self.storage.append_fact(&Fact::ticket_created(&ticket))?;
        Ok(ticket)
    }

    /// Load a ticket with its comment thread (creation order).
    pub fn get_ticket(&self, id: &str) -> Result<Ticket> {
        let id = self.storage.resolve_ticket_id(id)?;
        self.storage.load_ticket(&id)
    }

    /// List a project's tickets, filtered, ordered, and paginated.
    pub fn list_tickets(
        &self,
        project_id: &str,
        filter: &TicketFilter,
    ) -> Result<PagedResult<Ticket>> {
        let project_id = self.storage.resolve_project_id(project_id)?;
        let tickets = self.storage.list_tickets(&project_id)?;
        Ok(filter.apply(tickets))
    }

    /// Assign a ticket.
    ///
    /// Re-assigning the current assignee is accepted without saving or
    /// recording anything.
    pub fn assign_ticket(&self, id: &str, assignee: &str) -> Result<()> {
        let id = self.storage.resolve_ticket_id(id)?;
        let mut ticket = self.storage.load_ticket(&id)?;

        if let Some(fact) = ticket.assign(assignee)? {
            self.storage.save_ticket(&mut ticket)?;
            self.storage.append_fact(&fact)?;
        }
        Ok(())
    }

    /// Move a ticket to the next workflow status.
    pub fn change_ticket_status(&self, id: &str, next: Status) -> Result<()> {
        let id = self.storage.resolve_ticket_id(id)?;
        let mut ticket = self.storage.load_ticket(&id)?;

        let fact = ticket.change_status(next)?;
        self.storage.save_ticket(&mut ticket)?;
        self.storage.append_fact(&fact)?;
        Ok(())
    }

    /// Append a comment to a ticket.
    pub fn add_comment(&self, id: &str, author: &str, body: &str) -> Result<Comment> {
        let id = self.storage.resolve_ticket_id(id)?;
        let mut ticket = self.storage.load_ticket(&id)?;

        let (comment, fact) = ticket.add_comment(author, body)?;
        self.storage.save_ticket(&mut ticket)?;
        self.storage.append_fact(&fact)?;
        Ok(comment)
    }
}

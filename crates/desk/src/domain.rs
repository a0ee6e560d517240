//! Core domain types for the ticket tracker.
//!
//! This module defines projects, tickets, comments, and the facts emitted
//! when they change. All entity state is private: the only way to mutate a
//! ticket is through its named operations (`assign`, `change_status`,
//! `add_comment`), each of which enforces its own invariants and reports
//! what happened as a [`Fact`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::DomainError;

/// Ticket lifecycle status.
///
/// The workflow is a strict linear progression; see [`Status::successor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Freshly created, not yet picked up
    New,
    /// Currently being worked on
    InProgress,
    /// Work complete, awaiting confirmation
    Resolved,
    /// Confirmed done; terminal
    Closed,
}

impl Status {
    /// The single status reachable from this one, or `None` for `Closed`.
    pub fn successor(self) -> Option<Status> {
        match self {
            Status::New => Some(Status::InProgress),
            Status::InProgress => Some(Status::Resolved),
            Status::Resolved => Some(Status::Closed),
            Status::Closed => None,
        }
    }

    /// String form used in storage, CLI arguments, and query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::InProgress => "in_progress",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Status::New),
            "in_progress" | "inprogress" => Ok(Status::InProgress),
            "resolved" => Ok(Status::Resolved),
            "closed" => Ok(Status::Closed),
            _ => Err(DomainError::validation(
                "status",
                format!("unknown status: {}", s),
            )),
        }
    }
}

/// Ticket priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority (default)
    Medium,
    /// High priority
    High,
}

impl Priority {
    /// String form used in storage, CLI arguments, and query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(DomainError::validation(
                "priority",
                format!("unknown priority: {}", s),
            )),
        }
    }
}

const NAME_MAX: usize = 200;
const KEY_MAX: usize = 10;
const TITLE_MIN: usize = 5;
const TITLE_MAX: usize = 120;
const DESCRIPTION_MAX: usize = 5000;
const ASSIGNEE_MAX: usize = 200;
const AUTHOR_MAX: usize = 200;
const BODY_MIN: usize = 3;
const BODY_MAX: usize = 5000;

/// A named, keyed container scoping a set of tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: String,
    name: String,
    key: String,
    created_at: DateTime<Utc>,
}

impl Project {
    /// Create a project, validating and normalizing its name and key.
    ///
    /// The key is stored upper-cased. Neither name nor key is required to
    /// be unique.
    pub fn create(name: &str, key: &str) -> Result<Project, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        if name.chars().count() > NAME_MAX {
            return Err(DomainError::validation(
                "name",
                format!("must be at most {} characters", NAME_MAX),
            ));
        }

        let key = key.trim();
        if key.is_empty() {
            return Err(DomainError::validation("key", "must not be empty"));
        }
        if key.chars().count() > KEY_MAX {
            return Err(DomainError::validation(
                "key",
                format!("must be at most {} characters", KEY_MAX),
            ));
        }

        Ok(Project {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            key: key.to_uppercase(),
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// An immutable remark on a ticket.
///
/// Comments are append-only: once created they never change, and they are
/// kept in creation order on their owning ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: String,
    ticket_id: String,
    author: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ticket_id(&self) -> &str {
        &self.ticket_id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A unit of work tracked within a project.
///
/// Tickets own their comment thread and a persistence version counter used
/// by storage backends for optimistic-concurrency checks. The `project_id`
/// never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: String,
    project_id: String,
    title: String,
    description: Option<String>,
    status: Status,
    priority: Priority,
    assignee: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    version: u64,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl Ticket {
    /// Create a ticket in the `New` status.
    ///
    /// Validates the title (trimmed, 5-120 characters) and description
    /// (at most 5000 characters after trimming; empty or whitespace-only
    /// input is stored as absent). Whether `project_id` refers to an
    /// existing project is the caller's check, not this one's.
    pub fn create(
        project_id: &str,
        title: &str,
        description: Option<&str>,
        priority: Priority,
    ) -> Result<Ticket, DomainError> {
        let title = title.trim();
        let len = title.chars().count();
        if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
            return Err(DomainError::validation(
                "title",
                format!("must be between {} and {} characters", TITLE_MIN, TITLE_MAX),
            ));
        }

        let description = normalize_description(description)?;

        let now = Utc::now();
        Ok(Ticket {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            title: title.to_string(),
            description,
            status: Status::New,
            priority,
            assignee: None,
            created_at: now,
            updated_at: now,
            version: 0,
            comments: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Persistence version, bumped by the storage backend on every save.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Comments in creation order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Assign the ticket to someone.
    ///
    /// Re-assigning the same (trimmed) value is accepted silently: no
    /// `updated_at` bump and no fact, so repeated identical assignment
    /// leaves no trace in the history.
    pub fn assign(&mut self, assignee: &str) -> Result<Option<Fact>, DomainError> {
        let assignee = assignee.trim();
        if assignee.is_empty() {
            return Err(DomainError::validation("assignee", "must not be empty"));
        }
        if assignee.chars().count() > ASSIGNEE_MAX {
            return Err(DomainError::validation(
                "assignee",
                format!("must be at most {} characters", ASSIGNEE_MAX),
            ));
        }

        if self.assignee.as_deref() == Some(assignee) {
            return Ok(None);
        }

        self.assignee = Some(assignee.to_string());
        self.touch();
        Ok(Some(Fact::ticket_assigned(
            self.id.clone(),
            assignee.to_string(),
        )))
    }

    /// Move the ticket to the next workflow status.
    ///
    /// Strict policy: the target must be exactly `self.status().successor()`.
    /// Requesting the current status, skipping a stage, moving backward, or
    /// moving out of `Closed` all fail, and the ticket is left unchanged.
    pub fn change_status(&mut self, next: Status) -> Result<Fact, DomainError> {
        if self.status.successor() != Some(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        let from = self.status;
        self.status = next;
        self.touch();
        Ok(Fact::ticket_status_changed(self.id.clone(), from, next))
    }

    /// Append a comment to the ticket.
    ///
    /// Validates the author (non-empty, at most 200 characters) and body
    /// (3-5000 characters after trimming). On failure neither the ticket
    /// nor its comment thread changes.
    pub fn add_comment(&mut self, author: &str, body: &str) -> Result<(Comment, Fact), DomainError> {
        let author = author.trim();
        if author.is_empty() {
            return Err(DomainError::validation("author", "must not be empty"));
        }
        if author.chars().count() > AUTHOR_MAX {
            return Err(DomainError::validation(
                "author",
                format!("must be at most {} characters", AUTHOR_MAX),
            ));
        }

        let body = body.trim();
        let len = body.chars().count();
        if !(BODY_MIN..=BODY_MAX).contains(&len) {
            return Err(DomainError::validation(
                "body",
                format!("must be between {} and {} characters", BODY_MIN, BODY_MAX),
            ));
        }

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            ticket_id: self.id.clone(),
            author: author.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
        };
        self.comments.push(comment.clone());
        self.touch();

        let fact = Fact::comment_added(self.id.clone(), &comment);
        Ok((comment, fact))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Bump the persistence version. Storage backends call this once per
    /// successful save; nothing else may.
    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    #[cfg(test)]
    pub(crate) fn set_id_for_test(&mut self, id: &str) {
        self.id = id.to_string();
    }

    #[cfg(test)]
    pub(crate) fn set_updated_at_for_test(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

fn normalize_description(description: Option<&str>) -> Result<Option<String>, DomainError> {
    match description {
        None => Ok(None),
        Some(d) => {
            let d = d.trim();
            if d.is_empty() {
                return Ok(None);
            }
            if d.chars().count() > DESCRIPTION_MAX {
                return Err(DomainError::validation(
                    "description",
                    format!("must be at most {} characters", DESCRIPTION_MAX),
                ));
            }
            Ok(Some(d.to_string()))
        }
    }
}

/// A record of a state change, for downstream observers.
///
/// Mutating operations return facts; the command layer appends them to the
/// persistent event log. The core's obligation ends at making the fact
/// available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fact {
    /// A project was created
    ProjectCreated {
        /// Fact ID
        id: String,
        /// Project that was created
        project_id: String,
        /// When this occurred
        timestamp: DateTime<Utc>,
        /// Project name
        name: String,
        /// Project key
        key: String,
    },
    /// A ticket was created
    TicketCreated {
        /// Fact ID
        id: String,
        /// Ticket that was created
        ticket_id: String,
        /// Owning project
        project_id: String,
        /// When this occurred
        timestamp: DateTime<Utc>,
        /// Ticket title
        title: String,
        /// Ticket priority
        priority: Priority,
    },
    /// A ticket was assigned
    TicketAssigned {
        /// Fact ID
        id: String,
        /// Ticket that was assigned
        ticket_id: String,
        /// When this occurred
        timestamp: DateTime<Utc>,
        /// New assignee
        assignee: String,
    },
    /// A ticket moved through the workflow
    TicketStatusChanged {
        /// Fact ID
        id: String,
        /// Ticket that changed
        ticket_id: String,
        /// When this occurred
        timestamp: DateTime<Utc>,
        /// Previous status
        from: Status,
        /// New status
        to: Status,
    },
    /// A comment was added to a ticket
    CommentAdded {
        /// Fact ID
        id: String,
        /// Ticket that was commented on
        ticket_id: String,
        /// The new comment
        comment_id: String,
        /// When this occurred
        timestamp: DateTime<Utc>,
        /// Comment author
        author: String,
    },
}

impl Fact {
    /// Record a project creation
    pub fn project_created(project: &Project) -> Self {
        Fact::ProjectCreated {
            id: Uuid::new_v4().to_string(),
            project_id: project.id.clone(),
            timestamp: Utc::now(),
            name: project.name.clone(),
            key: project.key.clone(),
        }
    }

    /// Record a ticket creation
    pub fn ticket_created(ticket: &Ticket) -> Self {
        Fact::TicketCreated {
            id: Uuid::new_v4().to_string(),
            ticket_id: ticket.id.clone(),
            project_id: ticket.project_id.clone(),
            timestamp: Utc::now(),
            title: ticket.title.clone(),
            priority: ticket.priority,
        }
    }

    /// Record an assignment
    pub fn ticket_assigned(ticket_id: String, assignee: String) -> Self {
        Fact::TicketAssigned {
            id: Uuid::new_v4().to_string(),
            ticket_id,
            timestamp: Utc::now(),
            assignee,
        }
    }

    /// Record a status change
    pub fn ticket_status_changed(ticket_id: String, from: Status, to: Status) -> Self {
        Fact::TicketStatusChanged {
            id: Uuid::new_v4().to_string(),
            ticket_id,
            timestamp: Utc::now(),
            from,
            to,
        }
    }

    /// Record a new comment
    pub fn comment_added(ticket_id: String, comment: &Comment) -> Self {
        Fact::CommentAdded {
            id: Uuid::new_v4().to_string(),
            ticket_id,
            comment_id: comment.id.clone(),
            timestamp: Utc::now(),
            author: comment.author.clone(),
        }
    }

    /// Get the ticket ID this fact refers to, if any.
    pub fn ticket_id(&self) -> Option<&str> {
        match self {
            Fact::ProjectCreated { .. } => None,
            Fact::TicketCreated { ticket_id, .. }
            | Fact::TicketAssigned { ticket_id, .. }
            | Fact::TicketStatusChanged { ticket_id, .. }
            | Fact::CommentAdded { ticket_id, .. } => Some(ticket_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(title: &str) -> Ticket {
        Ticket::create("proj-1", title, None, Priority::Medium).unwrap()
    }

    #[test]
    fn test_create_ticket_defaults() {
        let t = ticket("Fix login bug");
        assert_eq!(t.status(), Status::New);
        assert_eq!(t.priority(), Priority::Medium);
        assert_eq!(t.assignee(), None);
        assert_eq!(t.created_at(), t.updated_at());
        assert_eq!(t.version(), 0);
        assert!(t.comments().is_empty());
    }

    #[test]
    fn test_title_boundaries() {
        assert!(Ticket::create("p", "abcd", None, Priority::Low).is_err());
        assert!(Ticket::create("p", "abcde", None, Priority::Low).is_ok());
        assert!(Ticket::create("p", &"x".repeat(120), None, Priority::Low).is_ok());
        assert!(Ticket::create("p", &"x".repeat(121), None, Priority::Low).is_err());
    }

    #[test]
    fn test_title_trimmed_before_validation() {
        // 4 significant chars padded with whitespace still fails
        let err = Ticket::create("p", "  abcd  ", None, Priority::Low).unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));

        let t = Ticket::create("p", "  valid title  ", None, Priority::Low).unwrap();
        assert_eq!(t.title(), "valid title");
    }

    #[test]
    fn test_blank_description_stored_as_absent() {
        let t = Ticket::create("p", "Fix login bug", Some("   "), Priority::Low).unwrap();
        assert_eq!(t.description(), None);

        let t = Ticket::create("p", "Fix login bug", Some(" details "), Priority::Low).unwrap();
        assert_eq!(t.description(), Some("details"));
    }

    #[test]
    fn test_description_too_long_rejected() {
        let long = "x".repeat(5001);
        let err = Ticket::create("p", "Fix login bug", Some(&long), Priority::Low).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation {
                field: "description",
                ..
            }
        ));
    }

    #[test]
    fn test_status_linear_progression() {
        let mut t = ticket("Fix login bug");
        t.change_status(Status::InProgress).unwrap();
        assert_eq!(t.status(), Status::InProgress);
        t.change_status(Status::Resolved).unwrap();
        assert_eq!(t.status(), Status::Resolved);
        t.change_status(Status::Closed).unwrap();
        assert_eq!(t.status(), Status::Closed);
    }

    #[test]
    fn test_same_status_rejected() {
        let mut t = ticket("Fix login bug");
        let err = t.change_status(Status::New).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: Status::New,
                to: Status::New
            }
        );
        assert_eq!(t.status(), Status::New);
    }

    #[test]
    fn test_skipping_and_backward_rejected() {
        let mut t = ticket("Fix login bug");
        assert!(t.change_status(Status::Resolved).is_err());
        assert!(t.change_status(Status::Closed).is_err());

        t.change_status(Status::InProgress).unwrap();
        t.change_status(Status::Resolved).unwrap();
        assert!(t.change_status(Status::InProgress).is_err());
        assert!(t.change_status(Status::New).is_err());
    }

    #[test]
    fn test_closed_is_terminal() {
        let mut t = ticket("Fix login bug");
        t.change_status(Status::InProgress).unwrap();
        t.change_status(Status::Resolved).unwrap();
        t.change_status(Status::Closed).unwrap();

        for target in [Status::New, Status::InProgress, Status::Resolved, Status::Closed] {
            assert!(t.change_status(target).is_err());
        }
        assert_eq!(t.status(), Status::Closed);
    }

    #[test]
    fn test_failed_transition_leaves_ticket_untouched() {
        let mut t = ticket("Fix login bug");
        let before = t.updated_at();
        assert!(t.change_status(Status::Closed).is_err());
        assert_eq!(t.status(), Status::New);
        assert_eq!(t.updated_at(), before);
    }

    #[test]
    fn test_status_change_returns_fact() {
        let mut t = ticket("Fix login bug");
        let fact = t.change_status(Status::InProgress).unwrap();
        match fact {
            Fact::TicketStatusChanged { from, to, .. } => {
                assert_eq!(from, Status::New);
                assert_eq!(to, Status::InProgress);
            }
            other => panic!("unexpected fact: {:?}", other),
        }
    }

    #[test]
    fn test_assign_trims_and_bumps_updated_at() {
        let mut t = ticket("Fix login bug");
        let fact = t.assign("  alice  ").unwrap();
        assert!(fact.is_some());
        assert_eq!(t.assignee(), Some("alice"));
        assert!(t.updated_at() >= t.created_at());
    }

    #[test]
    fn test_reassign_same_value_is_silent() {
        let mut t = ticket("Fix login bug");
        t.assign("alice").unwrap();
        let after_first = t.updated_at();

        let fact = t.assign(" alice ").unwrap();
        assert!(fact.is_none());
        assert_eq!(t.updated_at(), after_first);
    }

    #[test]
    fn test_assign_empty_rejected() {
        let mut t = ticket("Fix login bug");
        assert!(t.assign("   ").is_err());
        assert_eq!(t.assignee(), None);
    }

    #[test]
    fn test_assign_too_long_rejected() {
        let mut t = ticket("Fix login bug");
        assert!(t.assign(&"a".repeat(201)).is_err());
        assert!(t.assign(&"a".repeat(200)).is_ok());
    }

    #[test]
    fn test_comment_body_boundaries() {
        let mut t = ticket("Fix login bug");
        assert!(t.add_comment("alice", "ab").is_err());
        assert!(t.comments().is_empty());

        let (comment, _) = t.add_comment("alice", "abc").unwrap();
        assert_eq!(comment.body(), "abc");
        assert_eq!(t.comments().len(), 1);

        assert!(t.add_comment("alice", &"x".repeat(5001)).is_err());
        assert_eq!(t.comments().len(), 1);
    }

    #[test]
    fn test_comment_author_required() {
        let mut t = ticket("Fix login bug");
        assert!(t.add_comment("  ", "a valid body").is_err());
        assert!(t.comments().is_empty());
    }

    #[test]
    fn test_comment_bumps_ticket_updated_at() {
        let mut t = ticket("Fix login bug");
        let before = t.updated_at();
        let (comment, fact) = t.add_comment("alice", "Looking into it now").unwrap();
        assert!(t.updated_at() >= before);
        assert_eq!(comment.ticket_id(), t.id());
        match fact {
            Fact::CommentAdded { comment_id, author, .. } => {
                assert_eq!(comment_id, comment.id());
                assert_eq!(author, "alice");
            }
            other => panic!("unexpected fact: {:?}", other),
        }
    }

    #[test]
    fn test_project_key_uppercased() {
        let p = Project::create("Payments", "pay").unwrap();
        assert_eq!(p.key(), "PAY");
        assert_eq!(p.name(), "Payments");
    }

    #[test]
    fn test_project_validation() {
        assert!(Project::create("", "PAY").is_err());
        assert!(Project::create("  ", "PAY").is_err());
        assert!(Project::create("Payments", "").is_err());
        assert!(Project::create("Payments", "TOOLONGKEYX").is_err());
        assert!(Project::create(&"n".repeat(201), "PAY").is_err());
        assert!(Project::create(&"n".repeat(200), "PAY").is_ok());
    }

    #[test]
    fn test_status_round_trip() {
        for s in [Status::New, Status::InProgress, Status::Resolved, Status::Closed] {
            assert_eq!(s.as_str().parse::<Status>().unwrap(), s);
        }
        assert!("bogus".parse::<Status>().is_err());
    }

    #[test]
    fn test_priority_round_trip() {
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
        }
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_fact_serialization_is_tagged() {
        let t = ticket("Fix login bug");
        let fact = Fact::ticket_created(&t);
        let json = serde_json::to_string(&fact).unwrap();
        assert!(json.contains("\"type\":\"ticket_created\""));

        let back: Fact = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ticket_id(), Some(t.id()));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_status() -> impl Strategy<Value = Status> {
            prop_oneof![
                Just(Status::New),
                Just(Status::InProgress),
                Just(Status::Resolved),
                Just(Status::Closed),
            ]
        }

        proptest! {
            /// Only the single successor is ever accepted, from any state.
            #[test]
            fn only_successor_transitions_succeed(targets in proptest::collection::vec(any_status(), 1..20)) {
                let mut t = Ticket::create("p", "Property ticket", None, Priority::Low).unwrap();
                for target in targets {
                    let expected = t.status().successor() == Some(target);
                    let before = t.status();
                    let result = t.change_status(target);
                    prop_assert_eq!(result.is_ok(), expected);
                    if expected {
                        prop_assert_eq!(t.status(), target);
                    } else {
                        prop_assert_eq!(t.status(), before);
                    }
                }
            }

            /// updated_at never precedes created_at, whatever we do.
            #[test]
            fn updated_at_never_precedes_created_at(assignees in proptest::collection::vec("[a-z]{1,8}", 0..5)) {
                let mut t = Ticket::create("p", "Property ticket", None, Priority::Low).unwrap();
                for a in assignees {
                    let _ = t.assign(&a);
                    prop_assert!(t.updated_at() >= t.created_at());
                }
            }
        }
    }
}

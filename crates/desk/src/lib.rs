//! Desk Ticket Tracker Library
//!
//! Core functionality for the desk tracker: domain entities with a strict
//! lifecycle workflow, the filtered/paginated ticket query engine, the
//! command executor, and pluggable storage backends. Used by the `desk`
//! CLI and the `desk-server` REST API.

pub mod cli;
pub mod commands;
pub mod domain;
pub mod errors;
pub mod output;
pub mod query;
pub mod storage;

// Re-export commonly used types
pub use commands::CommandExecutor;
pub use domain::{Comment, Fact, Priority, Project, Status, Ticket};
pub use errors::{Conflict, DomainError, NotFound};
pub use output::{ExitCode, JsonError, JsonOutput};
pub use query::{PagedResult, TicketFilter};
pub use storage::{InMemoryStorage, JsonFileStorage, TicketStore};

//! Command-line interface definitions using clap.

use clap::{Parser, Subcommand};

/// Desk Ticket Tracker
///
/// A repository-local tracker for projects, tickets, and comments with a
/// strict lifecycle workflow. Designed for deterministic, machine-friendly
/// outputs.
///
/// Exit Codes:
///   0  - Command succeeded
///   1  - Generic error occurred
///   2  - Invalid arguments or usage error
///   3  - Resource not found (project, ticket)
///   4  - Validation or domain rule failed
///   7  - Concurrent modification detected
#[derive(Parser)]
#[command(name = "desk")]
#[command(about = "Project and ticket tracker", long_about = None)]
pub struct Cli {
    /// Suppress non-essential output (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the tracker in the current directory
    Init,

    /// Project management commands
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Ticket management commands
    #[command(subcommand)]
    Ticket(TicketCommands),

    /// Event log commands
    #[command(subcommand)]
    Events(EventCommands),
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        /// Project name (up to 200 characters)
        #[arg(long)]
        name: String,

        /// Project key, e.g. "PAY" (up to 10 characters, stored upper-cased)
        #[arg(long)]
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all projects by name
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum TicketCommands {
    /// Create a ticket in a project
    Create {
        /// Project id (or unique prefix)
        project: String,

        /// Ticket title (5-120 characters)
        #[arg(short, long)]
        title: String,

        /// Optional description (up to 5000 characters)
        #[arg(short, long)]
        description: Option<String>,

        /// Priority: low, medium, high
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a ticket with its comments
    Show {
        /// Ticket id (or unique prefix)
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List a project's tickets, filtered and paginated
    List {
        /// Project id (or unique prefix)
        project: String,

        /// Filter by status: new, in_progress, resolved, closed
        #[arg(long)]
        status: Option<String>,

        /// Filter by priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Filter by assignee substring (case sensitive)
        #[arg(long)]
        assignee: Option<String>,

        /// Filter by title/description substring (case sensitive)
        #[arg(long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Items per page (clamped to 1-200)
        #[arg(long, default_value_t = 20)]
        page_size: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign a ticket
    Assign {
        /// Ticket id (or unique prefix)
        id: String,

        /// Assignee (up to 200 characters)
        assignee: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a ticket to the next workflow status
    ///
    /// The workflow is strict: new -> in_progress -> resolved -> closed,
    /// one step at a time. Anything else fails.
    Status {
        /// Ticket id (or unique prefix)
        id: String,

        /// Target status: in_progress, resolved, closed
        next: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a comment to a ticket
    Comment {
        /// Ticket id (or unique prefix)
        id: String,

        /// Comment author (up to 200 characters)
        #[arg(long)]
        author: String,

        /// Comment body (3-5000 characters)
        #[arg(long)]
        body: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// List recorded facts, oldest first
    List {
        /// Only facts for this ticket id (or unique prefix)
        #[arg(long)]
        ticket: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

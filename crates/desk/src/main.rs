//! Desk Ticket Tracker CLI
//!
//! Repository-local project and ticket tracking with a strict lifecycle
//! workflow, deterministic queries, and machine-friendly output.

use anyhow::Result;
use clap::Parser;
use desk::cli::{Cli, Commands, EventCommands, ProjectCommands, TicketCommands};
use desk::commands::CommandExecutor;
use desk::domain::{Fact, Priority, Status, Ticket};
use desk::errors::{Conflict, DomainError, NotFound};
use desk::output::{ExitCode, JsonOutput, OutputContext};
use desk::query::TicketFilter;
use desk::storage::JsonFileStorage;
use std::env;

/// Map an error to the CLI exit code by recovering its category.
fn error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    if error.downcast_ref::<NotFound>().is_some() {
        return ExitCode::NotFound;
    }
    if error.downcast_ref::<DomainError>().is_some() {
        return ExitCode::ValidationFailed;
    }
    if error.downcast_ref::<Conflict>().is_some() {
        return ExitCode::Conflict;
    }

    let msg = error.to_string().to_lowercase();
    if msg.contains("ambiguous") || msg.contains("prefix must be") {
        ExitCode::InvalidArgument
    } else {
        ExitCode::GenericError
    }
}

fn main() {
    let exit_code = match run() {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {}", e);
            error_to_exit_code(&e)
        }
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let current_dir = env::current_dir()?;

    // Data directory: DESK_DATA_DIR env var or default to .desk/
    let data_dir = if let Ok(custom_dir) = env::var("DESK_DATA_DIR") {
        current_dir.join(custom_dir)
    } else {
        current_dir.join(".desk")
    };

    let storage = JsonFileStorage::new(&data_dir);
    let executor = CommandExecutor::new(storage);

    match cli.command {
        Commands::Init => {
            let ctx = OutputContext::new(quiet, false);
            executor.init()?;
            let _ = ctx.print_info("Initialized desk repository");
        }

        Commands::Project(cmd) => match cmd {
            ProjectCommands::Create { name, key, json } => {
                let project = executor.create_project(&name, &key)?;
                if json {
                    let output = JsonOutput::success(&project, "project create");
                    println!("{}", output.to_json_string()?);
                } else if quiet {
                    println!("{}", project.id());
                } else {
                    println!("Created project: {} [{}]", project.id(), project.key());
                }
            }
            ProjectCommands::List { json } => {
                let ctx = OutputContext::new(quiet, json);
                let projects = executor.list_projects()?;
                if json {
                    let output = JsonOutput::success(&projects, "project list");
                    println!("{}", output.to_json_string()?);
                } else {
                    let _ = ctx.print_info(format!("{} project(s):", projects.len()));
                    for project in projects {
                        println!("{} | {} | {}", project.id(), project.key(), project.name());
                    }
                }
            }
        },

        Commands::Ticket(cmd) => match cmd {
            TicketCommands::Create {
                project,
                title,
                description,
                priority,
                json,
            } => {
                let priority: Priority = priority.parse()?;
                let ticket =
                    executor.create_ticket(&project, &title, description.as_deref(), priority)?;
                if json {
                    let output = JsonOutput::success(&ticket, "ticket create");
                    println!("{}", output.to_json_string()?);
                } else if quiet {
                    println!("{}", ticket.id());
                } else {
                    println!("Created ticket: {}", ticket.id());
                }
            }
            TicketCommands::Show { id, json } => {
                let ticket = executor.get_ticket(&id)?;
                if json {
                    let output = JsonOutput::success(&ticket, "ticket show");
                    println!("{}", output.to_json_string()?);
                } else {
                    print_ticket(&ticket);
                }
            }
            TicketCommands::List {
                project,
                status,
                priority,
                assignee,
                search,
                page,
                page_size,
                json,
            } => {
                let ctx = OutputContext::new(quiet, json);
                let filter = TicketFilter {
                    status: status.as_deref().map(str::parse).transpose()?,
                    priority: priority.as_deref().map(str::parse).transpose()?,
                    assignee,
                    search,
                    page,
                    page_size,
                };
                let result = executor.list_tickets(&project, &filter)?;
                if json {
                    let output = JsonOutput::success(&result, "ticket list");
                    println!("{}", output.to_json_string()?);
                } else {
                    let _ = ctx.print_info(format!(
                        "{} ticket(s), page {} (showing {}):",
                        result.total,
                        result.page,
                        result.items.len()
                    ));
                    for ticket in &result.items {
                        println!(
                            "{} | {} | {} | {} | {}",
                            ticket.id(),
                            ticket.title(),
                            ticket.status(),
                            ticket.priority(),
                            ticket.assignee().unwrap_or("-")
                        );
                    }
                }
            }
            TicketCommands::Assign { id, assignee, json } => {
                let ctx = OutputContext::new(quiet, json);
                executor.assign_ticket(&id, &assignee)?;
                if json {
                    let ticket = executor.get_ticket(&id)?;
                    let output = JsonOutput::success(&ticket, "ticket assign");
                    println!("{}", output.to_json_string()?);
                } else {
                    let _ = ctx.print_info(format!("Assigned to {}", assignee.trim()));
                }
            }
            TicketCommands::Status { id, next, json } => {
                let ctx = OutputContext::new(quiet, json);
                let next: Status = next.parse()?;
                executor.change_ticket_status(&id, next)?;
                if json {
                    let ticket = executor.get_ticket(&id)?;
                    let output = JsonOutput::success(&ticket, "ticket status");
                    println!("{}", output.to_json_string()?);
                } else {
                    let _ = ctx.print_info(format!("Status changed to {}", next));
                }
            }
            TicketCommands::Comment {
                id,
                author,
                body,
                json,
            } => {
                let comment = executor.add_comment(&id, &author, &body)?;
                if json {
                    let output = JsonOutput::success(&comment, "ticket comment");
                    println!("{}", output.to_json_string()?);
                } else if quiet {
                    println!("{}", comment.id());
                } else {
                    println!("Added comment: {}", comment.id());
                }
            }
        },

        Commands::Events(cmd) => match cmd {
            EventCommands::List { ticket, json } => {
                let ctx = OutputContext::new(quiet, json);
                let facts = match ticket {
                    Some(id) => executor.list_facts_for_ticket(&id)?,
                    None => executor.list_facts()?,
                };
                if json {
                    let output = JsonOutput::success(&facts, "events list");
                    println!("{}", output.to_json_string()?);
                } else {
                    let _ = ctx.print_info(format!("{} fact(s):", facts.len()));
                    for fact in &facts {
                        println!("{}", describe_fact(fact));
                    }
                }
            }
        },
    }

    Ok(())
}

fn print_ticket(ticket: &Ticket) {
    println!("ID: {}", ticket.id());
    println!("Project: {}", ticket.project_id());
    println!("Title: {}", ticket.title());
    if let Some(description) = ticket.description() {
        println!("Description: {}", description);
    }
    println!("Status: {}", ticket.status());
    println!("Priority: {}", ticket.priority());
    println!("Assignee: {}", ticket.assignee().unwrap_or("(unassigned)"));
    println!("Created: {}", ticket.created_at().to_rfc3339());
    println!("Updated: {}", ticket.updated_at().to_rfc3339());
    if !ticket.comments().is_empty() {
        println!("Comments:");
        for comment in ticket.comments() {
            println!(
                "  [{}] {}: {}",
                comment.created_at().to_rfc3339(),
                comment.author(),
                comment.body()
            );
        }
    }
}

fn describe_fact(fact: &Fact) -> String {
    match fact {
        Fact::ProjectCreated {
            timestamp,
            project_id,
            name,
            key,
            ..
        } => format!(
            "{} | project_created | {} | {} [{}]",
            timestamp.to_rfc3339(),
            project_id,
            name,
            key
        ),
        Fact::TicketCreated {
            timestamp,
            ticket_id,
            title,
            ..
        } => format!(
            "{} | ticket_created | {} | {}",
            timestamp.to_rfc3339(),
            ticket_id,
            title
        ),
        Fact::TicketAssigned {
            timestamp,
            ticket_id,
            assignee,
            ..
        } => format!(
            "{} | ticket_assigned | {} | {}",
            timestamp.to_rfc3339(),
            ticket_id,
            assignee
        ),
        Fact::TicketStatusChanged {
            timestamp,
            ticket_id,
            from,
            to,
            ..
        } => format!(
            "{} | ticket_status_changed | {} | {} -> {}",
            timestamp.to_rfc3339(),
            ticket_id,
            from,
            to
        ),
        Fact::CommentAdded {
            timestamp,
            ticket_id,
            author,
            ..
        } => format!(
            "{} | comment_added | {} | {}",
            timestamp.to_rfc3339(),
            ticket_id,
            author
        ),
    }
}

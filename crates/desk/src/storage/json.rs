//! JSON file-based storage implementation.
//!
//! Each project and ticket is stored as its own JSON document under a
//! `data/` directory, with atomic writes (temp file, then rename). Facts
//! are appended to a JSONL log. Comments live inside their owning ticket's
//! document, so each save writes one whole aggregate.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::domain::{Fact, Project, Ticket};
use crate::errors::{Conflict, NotFound};
use crate::storage::{resolve_partial_id, TicketStore};

const PROJECTS_DIR: &str = "data/projects";
const TICKETS_DIR: &str = "data/tickets";
const INDEX_FILE: &str = "data/index.json";
const EVENTS_FILE: &str = "data/events.jsonl";

/// Index of all entities in the repository
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Index {
    /// Schema version for future migrations
    schema_version: u32,
    /// All project ids
    project_ids: Vec<String>,
    /// All ticket ids
    ticket_ids: Vec<String>,
}

impl Default for Index {
    fn default() -> Self {
        Self {
            schema_version: 1,
            project_ids: Vec::new(),
            ticket_ids: Vec::new(),
        }
    }
}

/// JSON file-based storage for projects, tickets, and facts.
#[derive(Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Create a new JSON file storage instance at the given root path
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Check that the repository has been initialized at this root.
    pub fn validate(&self) -> Result<()> {
        let index_path = self.root.join(INDEX_FILE);
        if !index_path.exists() {
            anyhow::bail!(
                "no desk repository at {} (missing {})",
                self.root.display(),
                INDEX_FILE
            );
        }
        Ok(())
    }

    fn project_path(&self, id: &str) -> PathBuf {
        self.root.join(PROJECTS_DIR).join(format!("{}.json", id))
    }

    fn ticket_path(&self, id: &str) -> PathBuf {
        self.root.join(TICKETS_DIR).join(format!("{}.json", id))
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).context("Failed to write temporary file")?;
        fs::rename(&temp_path, path).context("Failed to rename temporary file")?;

        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        serde_json::from_str(&contents).context("Failed to deserialize data")
    }

    fn load_index(&self) -> Result<Index> {
        let index_path = self.root.join(INDEX_FILE);
        self.read_json(&index_path)
    }

    fn save_index(&self, index: &Index) -> Result<()> {
        let index_path = self.root.join(INDEX_FILE);
        self.write_json(&index_path, index)
    }
}

impl TicketStore for JsonFileStorage {
    fn init(&self) -> Result<()> {
        for dir in [PROJECTS_DIR, TICKETS_DIR] {
            fs::create_dir_all(self.root.join(dir))
                .with_context(|| format!("Failed to create {} directory", dir))?;
        }

        let index_path = self.root.join(INDEX_FILE);
        if !index_path.exists() {
            self.write_json(&index_path, &Index::default())?;
        }

        let events_path = self.root.join(EVENTS_FILE);
        if !events_path.exists() {
            fs::File::create(&events_path).context("Failed to create events file")?;
        }

        Ok(())
    }

    fn save_project(&self, project: &Project) -> Result<()> {
        self.write_json(&self.project_path(project.id()), project)?;

        let mut index = self.load_index()?;
        if !index.project_ids.iter().any(|id| id == project.id()) {
            index.project_ids.push(project.id().to_string());
            self.save_index(&index)?;
        }

        Ok(())
    }

    fn load_project(&self, id: &str) -> Result<Project> {
        let path = self.project_path(id);
        if !path.exists() {
            return Err(NotFound::project(id).into());
        }
        self.read_json(&path)
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        let index = self.load_index()?;
        index
            .project_ids
            .iter()
            .map(|id| self.load_project(id))
            .collect()
    }

    fn delete_project(&self, id: &str) -> Result<()> {
        let path = self.project_path(id);
        if !path.exists() {
            return Err(NotFound::project(id).into());
        }

        for ticket in self.list_tickets(id)? {
            self.delete_ticket(ticket.id())?;
        }

        fs::remove_file(&path).context("Failed to delete project file")?;
        let mut index = self.load_index()?;
        index.project_ids.retain(|i| i != id);
        self.save_index(&index)?;

        Ok(())
    }

    fn save_ticket(&self, ticket: &mut Ticket) -> Result<()> {
        let path = self.ticket_path(ticket.id());
        if path.exists() {
            let stored: Ticket = self.read_json(&path)?;
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
        self.write_json(&path, ticket)?;

        let mut index = self.load_index()?;
        if !index.ticket_ids.iter().any(|id| id == ticket.id()) {
            index.ticket_ids.push(ticket.id().to_string());
            self.save_index(&index)?;
        }

        Ok(())
    }

    fn load_ticket(&self, id: &str) -> Result<Ticket> {
        let path = self.ticket_path(id);
        if !path.exists() {
            return Err(NotFound::ticket(id).into());
        }
        self.read_json(&path)
    }

    fn list_tickets(&self, project_id: &str) -> Result<Vec<Ticket>> {
        let index = self.load_index()?;
        let mut tickets = Vec::new();
        for id in &index.ticket_ids {
            let ticket = self.load_ticket(id)?;
            if ticket.project_id() == project_id {
                tickets.push(ticket);
            }
        }
        Ok(tickets)
    }

    fn delete_ticket(&self, id: &str) -> Result<()> {
        let path = self.ticket_path(id);
        if !path.exists() {
            return Err(NotFound::ticket(id).into());
        }
        fs::remove_file(&path).context("Failed to delete ticket file")?;

        let mut index = self.load_index()?;
        index.ticket_ids.retain(|i| i != id);
        self.save_index(&index)?;

        Ok(())
    }

    fn resolve_project_id(&self, partial: &str) -> Result<String> {
        let index = self.load_index()?;
        resolve_partial_id("project", partial, index.project_ids.iter().map(|s| s.as_str()))
    }

    fn resolve_ticket_id(&self, partial: &str) -> Result<String> {
        let index = self.load_index()?;
        resolve_partial_id("ticket", partial, index.ticket_ids.iter().map(|s| s.as_str()))
    }

    fn append_fact(&self, fact: &Fact) -> Result<()> {
        let events_path = self.root.join(EVENTS_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&events_path)
            .context("Failed to open events file")?;

        let json = serde_json::to_string(fact).context("Failed to serialize fact")?;
        writeln!(file, "{}", json).context("Failed to write fact")?;
        Ok(())
    }

    fn read_facts(&self) -> Result<Vec<Fact>> {
        let events_path = self.root.join(EVENTS_FILE);
        if !events_path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&events_path).context("Failed to open events file")?;
        let reader = BufReader::new(file);

        let mut facts = Vec::new();
        for line in reader.lines() {
            let line = line.context("Failed to read line from events file")?;
            if line.trim().is_empty() {
                continue;
            }
            let fact: Fact = serde_json::from_str(&line).context("Failed to deserialize fact")?;
            facts.push(fact);
        }

        Ok(facts)
    }
}

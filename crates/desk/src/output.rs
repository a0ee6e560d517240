//! Structured output formatting for CLI commands.
//!
//! Provides consistent JSON envelopes for success and error cases so the
//! CLI stays machine-readable for scripts and automation.

use chrono::Utc;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};

/// Version of the JSON output format
const OUTPUT_VERSION: &str = "0.1.0";

/// Context for controlling output verbosity
pub struct OutputContext {
    quiet: bool,
    json: bool,
}

impl OutputContext {
    /// Create a new output context
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Print essential output (always shown unless --json)
    pub fn print_data(&self, msg: impl Display) -> io::Result<()> {
        if !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print informational message (suppressed by --quiet or --json)
    pub fn print_info(&self, msg: impl Display) -> io::Result<()> {
        if !self.quiet && !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Check if JSON mode is enabled
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Safe println that handles broken pipes gracefully
fn writeln_safe(msg: &str) -> io::Result<()> {
    match writeln!(io::stdout(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            // Expected when piping to head and friends
            std::process::exit(0);
        }
        Err(e) => Err(e),
    }
}

/// Wrapper for successful command output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub metadata: Metadata,
}

impl<T: Serialize> JsonOutput<T> {
    /// Create a new successful output with the given data
    pub fn success(data: T, command: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            metadata: Metadata::new(command),
        }
    }

    /// Serialize to JSON string with pretty formatting
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Wrapper for error output
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub success: bool,
    pub error: ErrorDetail,
    pub metadata: Metadata,
}

impl JsonError {
    /// Create a new error output
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
            metadata: Metadata::new(command),
        }
    }

    /// Serialize to JSON string with pretty formatting
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Error details: machine-readable code plus human message
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code (e.g., "not_found", "invalid_transition")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Envelope metadata common to every JSON response
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Command that produced this output
    pub command: String,
    /// When the output was produced
    pub timestamp: chrono::DateTime<Utc>,
    /// Output format version
    pub version: &'static str,
}

impl Metadata {
    fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timestamp: Utc::now(),
            version: OUTPUT_VERSION,
        }
    }
}

/// Standardized exit codes for the desk CLI.
///
/// Follows Unix conventions for consistent error reporting in scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded (0)
    Success = 0,

    /// Generic error (1)
    GenericError = 1,

    /// Invalid arguments or usage error (2)
    InvalidArgument = 2,

    /// Resource not found - project, ticket (3)
    NotFound = 3,

    /// Validation or domain rule failed (4)
    ValidationFailed = 4,

    /// Concurrent modification detected (7)
    Conflict = 7,
}

impl ExitCode {
    /// The numeric process exit code
    pub fn code(self) -> i32 {
        self as i32
    }
}

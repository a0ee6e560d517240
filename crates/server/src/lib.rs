//! Desk REST API Server Library
//!
//! Provides a web API for the desk ticket tracker, enabling web UIs and
//! external integrations to manage projects and tickets.

pub mod routes;

// Re-export for convenience
pub use routes::create_routes;

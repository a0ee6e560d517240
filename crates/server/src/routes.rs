//! API route definitions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use desk::commands::CommandExecutor;
use desk::domain::{Comment, Priority, Project, Status, Ticket};
use desk::errors::{Conflict, DomainError, NotFound};
use desk::query::{PagedResult, TicketFilter};
use desk::storage::TicketStore;

/// Shared application state
pub type AppState<S> = Arc<CommandExecutor<S>>;

/// Create API routes
pub fn create_routes<S: TicketStore + Send + Sync + 'static>(
    executor: Arc<CommandExecutor<S>>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/:id/tickets",
            get(list_tickets).post(create_ticket),
        )
        .route("/tickets/:id", get(get_ticket))
        .route("/tickets/:id/assign", post(assign_ticket))
        .route("/tickets/:id/status", post(change_ticket_status))
        .route("/tickets/:id/comments", post(add_comment))
        .with_state(executor)
}

/// Error wrapper that maps the core taxonomy onto HTTP statuses.
///
/// Validation and workflow violations are 400, missing resources 404,
/// concurrent-modification conflicts 409 (retryable), anything else 500
/// with the detail kept out of the response body.
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = if let Some(domain) = self.0.downcast_ref::<DomainError>() {
            match domain {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_failed"),
                DomainError::InvalidTransition { .. } => {
                    (StatusCode::BAD_REQUEST, "invalid_transition")
                }
            }
        } else if self.0.downcast_ref::<NotFound>().is_some() {
            (StatusCode::NOT_FOUND, "not_found")
        } else if self.0.downcast_ref::<Conflict>().is_some() {
            (StatusCode::CONFLICT, "conflict")
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal")
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {:?}", self.0);
            "unexpected error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(serde_json::json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));
        (status, body).into_response()
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "desk-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub key: String,
}

/// Create a project
async fn create_project<S: TicketStore>(
    State(executor): State<AppState<S>>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let project = executor.create_project(&req.name, &req.key)?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// List all projects by name
async fn list_projects<S: TicketStore>(
    State(executor): State<AppState<S>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(executor.list_projects()?))
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

/// Create a ticket in a project
async fn create_ticket<S: TicketStore>(
    Path(project_id): Path<String>,
    State(executor): State<AppState<S>>,
    Json(req): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let priority = match req.priority.as_deref() {
        Some(p) => p.parse::<Priority>()?,
        None => Priority::default(),
    };
    let ticket = executor.create_ticket(
        &project_id,
        &req.title,
        req.description.as_deref(),
        priority,
    )?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Ticket list query parameters
#[derive(Debug, Deserialize)]
pub struct TicketListQuery {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_page_size")]
    page_size: usize,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    desk::query::DEFAULT_PAGE_SIZE
}

/// List a project's tickets, filtered and paginated
async fn list_tickets<S: TicketStore>(
    Path(project_id): Path<String>,
    Query(params): Query<TicketListQuery>,
    State(executor): State<AppState<S>>,
) -> Result<Json<PagedResult<Ticket>>, ApiError> {
    // Enum values are validated here, before the filter is built; the
    // query engine itself only clamps.
    let filter = TicketFilter {
        status: params
            .status
            .as_deref()
            .map(str::parse::<Status>)
            .transpose()?,
        priority: params
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?,
        assignee: params.assignee,
        search: params.search,
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(executor.list_tickets(&project_id, &filter)?))
}

/// Get a single ticket with its comments
async fn get_ticket<S: TicketStore>(
    Path(id): Path<String>,
    State(executor): State<AppState<S>>,
) -> Result<Json<Ticket>, ApiError> {
    Ok(Json(executor.get_ticket(&id)?))
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub assignee: String,
}

/// Assign a ticket
async fn assign_ticket<S: TicketStore>(
    Path(id): Path<String>,
    State(executor): State<AppState<S>>,
    Json(req): Json<AssignRequest>,
) -> Result<StatusCode, ApiError> {
    executor.assign_ticket(&id, &req.assignee)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
}

/// Move a ticket to the next workflow status.
///
/// Strict policy: requesting the current status is a 400, not a no-op.
async fn change_ticket_status<S: TicketStore>(
    Path(id): Path<String>,
    State(executor): State<AppState<S>>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<StatusCode, ApiError> {
    let next = req.status.parse::<Status>()?;
    executor.change_ticket_status(&id, next)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub author: String,
    pub body: String,
}

/// Add a comment to a ticket
async fn add_comment<S: TicketStore>(
    Path(id): Path<String>,
    State(executor): State<AppState<S>>,
    Json(req): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = executor.add_comment(&id, &req.author, &req.body)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

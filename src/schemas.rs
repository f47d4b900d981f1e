use std::time::Duration;

use axum::{http::StatusCode, response::Json};
use common::{
    AccountResponse, Address, AddressPayload, ArtistAccount, CandidateProfile,
    CandidatureRequest, CreateAccountRequest, CreateFeedbackRequest, EventDetail, EventFeedback,
    EventPayload, EventPublic, EventView, EventWithOwner, FeedbackQuery, FeedbackResponse,
    LineupEntry, LineupRequest, LineupSlot, LoginRequest, MusicStyleName, OwnerAccount,
    RepeatEvent, Role, TokenResponse, UpdateAccountRequest, UserSummary,
};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use workflow::WorkflowError;

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Token key to user id
    pub token_cache: Cache<String, i32>,
    /// Per-request timeout applied by the router
    pub request_timeout: Duration,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
    /// Keys missing from the request body, only for `REQUIRED_FIELDS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_fields: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
            required_fields: None,
        }
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Plain acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

/// Result of a candidature request: an artist's application or the owner's
/// updated view of the event.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CandidatureOutcome {
    Applied(MessageResponse),
    Updated(EventDetail),
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(message, code)))
}

/// Maps a workflow failure onto the HTTP error contract.
pub fn workflow_error(err: WorkflowError) -> ApiError {
    match err {
        WorkflowError::MissingFields(fields) => {
            let mut body = ErrorResponse::new(
                format!("Missing required fields: {}", fields.join(", ")),
                "REQUIRED_FIELDS",
            );
            body.required_fields = Some(fields);
            (StatusCode::NOT_ACCEPTABLE, Json(body))
        }
        WorkflowError::Validation(msg) => api_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
        WorkflowError::InvalidTransition(msg) => {
            api_error(StatusCode::BAD_REQUEST, "INVALID_TRANSITION", msg)
        }
        err @ WorkflowError::NotFound { .. } => {
            api_error(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        WorkflowError::PermissionDenied(msg) => {
            api_error(StatusCode::FORBIDDEN, "PERMISSION_DENIED", msg)
        }
        WorkflowError::Conflict(msg) => api_error(StatusCode::CONFLICT, "CONFLICT", msg),
        WorkflowError::Database(db_error) => {
            error!("Database error: {}", db_error);
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Internal server error",
            )
        }
    }
}

struct TokenAuth;

impl Modify for TokenAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Token <key>",
                ))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::accounts::create_account,
        crate::handlers::accounts::login,
        crate::handlers::accounts::list_artists,
        crate::handlers::accounts::list_owners,
        crate::handlers::accounts::get_account,
        crate::handlers::accounts::update_account,
        crate::handlers::accounts::delete_account,
        crate::handlers::events::create_event,
        crate::handlers::events::list_events,
        crate::handlers::events::get_event,
        crate::handlers::events::update_event,
        crate::handlers::events::delete_event,
        crate::handlers::events::update_candidatures,
        crate::handlers::events::update_lineup,
        crate::handlers::feedbacks::create_feedback,
        crate::handlers::feedbacks::list_event_feedbacks,
        crate::handlers::feedbacks::list_feedbacks,
    ),
    components(
        schemas(
            ApiResponse<AccountResponse>,
            ApiResponse<Vec<AccountResponse>>,
            ApiResponse<TokenResponse>,
            ApiResponse<EventView>,
            ApiResponse<Vec<EventView>>,
            ApiResponse<EventDetail>,
            ApiResponse<CandidatureOutcome>,
            ApiResponse<FeedbackResponse>,
            ApiResponse<Vec<FeedbackResponse>>,
            ApiResponse<Vec<EventFeedback>>,
            ErrorResponse,
            HealthResponse,
            MessageResponse,
            CandidatureOutcome,
            Role,
            RepeatEvent,
            CreateAccountRequest,
            UpdateAccountRequest,
            LoginRequest,
            TokenResponse,
            AccountResponse,
            OwnerAccount,
            ArtistAccount,
            UserSummary,
            CandidateProfile,
            AddressPayload,
            Address,
            MusicStyleName,
            EventPayload,
            EventPublic,
            EventDetail,
            EventView,
            EventWithOwner,
            CandidatureRequest,
            LineupEntry,
            LineupRequest,
            LineupSlot,
            CreateFeedbackRequest,
            FeedbackResponse,
            EventFeedback,
            FeedbackQuery,
        )
    ),
    modifiers(&TokenAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "accounts", description = "Owner and artist accounts"),
        (name = "events", description = "Events, candidatures and lineups"),
        (name = "feedbacks", description = "Feedback between event participants"),
    ),
    info(
        title = "Gigbook API",
        description = "Live-music booking: owners publish events, artists apply and get booked, both sides leave feedback",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

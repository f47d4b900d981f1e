use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::error;

/// Error types for the booking workflow
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Required keys absent from the request body
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Malformed or disallowed field value
    #[error("{0}")]
    Validation(String),

    /// Referenced row does not exist
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// Caller lacks the role or ownership the operation needs
    #[error("{0}")]
    PermissionDenied(String),

    /// Duplicate unique value or repeated action
    #[error("{0}")]
    Conflict(String),

    /// Candidature/lineup state machine violation
    #[error("{0}")]
    InvalidTransition(String),
}

impl WorkflowError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        WorkflowError::NotFound { entity, id }
    }

    /// Turns a unique constraint violation into a conflict carrying `message`,
    /// anything else stays a database error.
    pub fn from_insert(err: DbErr, message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                error!(%detail, "Unique constraint violated");
                WorkflowError::Conflict(message.to_string())
            }
            _ => WorkflowError::Database(err),
        }
    }
}

/// Type alias for Result with WorkflowError
pub type Result<T> = std::result::Result<T, WorkflowError>;

use crate::auth::AuthUser;
use crate::helpers::{
    converters::{event_feedback, feedback_response},
    payload::{JsonBody, ValidQuery, parse},
};
use crate::schemas::{ApiError, ApiResponse, AppState, workflow_error};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{CreateFeedbackRequest, EventFeedback, FeedbackQuery, FeedbackResponse};
use tracing::{debug, info, instrument, trace, warn};
use workflow::feedback::{self as workflow_feedback, REQUIRED_FEEDBACK_FIELDS};
use workflow::fields;

/// Leave feedback for another participant of the event
#[utoipa::path(
    post,
    path = "/api/events/{event_id}/feedbacks/",
    tag = "feedbacks",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
    ),
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback created successfully", body = ApiResponse<FeedbackResponse>),
        (status = 400, description = "Same role or addressed user did not take part", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller did not take part in the event", body = ErrorResponse),
        (status = 404, description = "Event or user not found", body = ErrorResponse),
        (status = 406, description = "Required fields missing", body = ErrorResponse),
        (status = 409, description = "Feedback already sent to this user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller, body))]
pub async fn create_feedback(
    Path(event_id): Path<i32>,
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<ApiResponse<FeedbackResponse>>), ApiError> {
    trace!("Entering create_feedback function for event_id: {}", event_id);
    fields::require(&body, &REQUIRED_FEEDBACK_FIELDS).map_err(workflow_error)?;
    let request: CreateFeedbackRequest = parse(body)?;
    debug!(
        "User {} leaving {} star(s) for user {}",
        caller.id, request.stars, request.addressed_user
    );

    match workflow_feedback::create_feedback(&state.db, &caller, event_id, request).await {
        Ok(snapshot) => {
            info!("Feedback created successfully with ID: {}", snapshot.feedback.id);
            let response = ApiResponse::new(
                feedback_response(&snapshot),
                "Feedback created successfully",
            );
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(err) => {
            warn!("Failed to create feedback on event {}: {}", event_id, err);
            Err(workflow_error(err))
        }
    }
}

/// List feedback left on an event
#[utoipa::path(
    get,
    path = "/api/events/{event_id}/feedbacks/",
    tag = "feedbacks",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
    ),
    responses(
        (status = 200, description = "Feedback retrieved successfully", body = ApiResponse<Vec<EventFeedback>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, _caller))]
pub async fn list_event_feedbacks(
    Path(event_id): Path<i32>,
    State(state): State<AppState>,
    _caller: AuthUser,
) -> Result<Json<ApiResponse<Vec<EventFeedback>>>, ApiError> {
    trace!("Entering list_event_feedbacks function for event_id: {}", event_id);
    let snapshots = workflow_feedback::list_for_event(&state.db, event_id)
        .await
        .map_err(workflow_error)?;

    debug!("Retrieved {} feedback(s) for event {}", snapshots.len(), event_id);
    let feedbacks = snapshots.iter().map(event_feedback).collect();
    Ok(Json(ApiResponse::new(feedbacks, "Feedback retrieved successfully")))
}

/// List feedback with optional filters and pagination
#[utoipa::path(
    get,
    path = "/api/feedbacks/",
    tag = "feedbacks",
    params(FeedbackQuery),
    responses(
        (status = 200, description = "Feedback retrieved successfully", body = ApiResponse<Vec<FeedbackResponse>>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller))]
pub async fn list_feedbacks(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidQuery(query): ValidQuery<FeedbackQuery>,
) -> Result<Json<ApiResponse<Vec<FeedbackResponse>>>, ApiError> {
    trace!("Entering list_feedbacks function");
    debug!("Feedback filters: {:?}", query);

    let snapshots = workflow_feedback::list_filtered(&state.db, &caller, &query)
        .await
        .map_err(workflow_error)?;

    info!("Retrieved {} feedback(s)", snapshots.len());
    let feedbacks = snapshots.iter().map(feedback_response).collect();
    Ok(Json(ApiResponse::new(feedbacks, "Feedback retrieved successfully")))
}

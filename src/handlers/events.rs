use crate::auth::AuthUser;
use crate::helpers::{
    converters::{event_detail, event_view},
    payload::{JsonBody, optional_json, parse},
};
use crate::schemas::{
    ApiError, ApiResponse, AppState, CandidatureOutcome, MessageResponse,
    workflow_error,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::{
    CandidatureRequest, EventDetail, EventPayload, EventView, LineupRequest,
};
use serde_json::Value;
use tracing::{debug, info, instrument, trace, warn};
use workflow::event::{self as workflow_event, REQUIRED_EVENT_FIELDS};
use workflow::fields;

fn parse_event_payload(body: Value) -> Result<EventPayload, ApiError> {
    fields::require(&body, &REQUIRED_EVENT_FIELDS).map_err(workflow_error)?;
    parse(body)
}

/// Create an event owned by the caller
#[utoipa::path(
    post,
    path = "/api/events/",
    tag = "events",
    request_body = EventPayload,
    responses(
        (status = 201, description = "Event created successfully", body = ApiResponse<EventDetail>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Only owners can create events", body = ErrorResponse),
        (status = 406, description = "Required fields missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller, body))]
pub async fn create_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<ApiResponse<EventDetail>>), ApiError> {
    trace!("Entering create_event function");
    workflow_event::ensure_can_create(&caller).map_err(|err| {
        warn!("User {} may not create events", caller.id);
        workflow_error(err)
    })?;
    let payload = parse_event_payload(body)?;
    debug!(
        "Creating event at {} with {} music style(s)",
        payload.datetime,
        payload.music_styles.len()
    );

    match workflow_event::create_event(&state.db, &caller, payload).await {
        Ok(snapshot) => {
            info!("Event created successfully with ID: {}", snapshot.event.id);
            let response = ApiResponse::new(event_detail(&snapshot), "Event created successfully");
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(err) => {
            warn!("Failed to create event: {}", err);
            Err(workflow_error(err))
        }
    }
}

/// List events: an owner's own events, or upcoming events for artists
#[utoipa::path(
    get,
    path = "/api/events/",
    tag = "events",
    responses(
        (status = 200, description = "Events retrieved successfully", body = ApiResponse<Vec<EventView>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller))]
pub async fn list_events(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ApiResponse<Vec<EventView>>>, ApiError> {
    trace!("Entering list_events function");
    let snapshots = if caller.is_owner() {
        workflow_event::owned_events(&state.db, &caller).await
    } else {
        workflow_event::upcoming_events(&state.db, Utc::now()).await
    }
    .map_err(workflow_error)?;

    debug!("Retrieved {} events for user {}", snapshots.len(), caller.id);
    let events: Vec<EventView> = snapshots
        .iter()
        .map(|snapshot| event_view(snapshot, &caller))
        .collect();
    Ok(Json(ApiResponse::new(events, "Events retrieved successfully")))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/api/events/{event_id}/",
    tag = "events",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
    ),
    responses(
        (status = 200, description = "Event retrieved successfully", body = ApiResponse<EventView>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller))]
pub async fn get_event(
    Path(event_id): Path<i32>,
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ApiResponse<EventView>>, ApiError> {
    trace!("Entering get_event function for event_id: {}", event_id);
    match workflow_event::find_event(&state.db, event_id).await {
        Ok(snapshot) => Ok(Json(ApiResponse::new(
            event_view(&snapshot, &caller),
            "Event retrieved successfully",
        ))),
        Err(err) => {
            warn!("Event {} lookup failed: {}", event_id, err);
            Err(workflow_error(err))
        }
    }
}

/// Replace an event's fields
#[utoipa::path(
    put,
    path = "/api/events/{event_id}/",
    tag = "events",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
    ),
    request_body = EventPayload,
    responses(
        (status = 200, description = "Event updated successfully", body = ApiResponse<EventDetail>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the event owner", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 406, description = "Required fields missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller, body))]
pub async fn update_event(
    Path(event_id): Path<i32>,
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<EventDetail>>, ApiError> {
    trace!("Entering update_event function for event_id: {}", event_id);
    let payload = parse_event_payload(body)?;

    match workflow_event::update_event(&state.db, &caller, event_id, payload).await {
        Ok(snapshot) => {
            info!("Event {} updated", event_id);
            Ok(Json(ApiResponse::new(
                event_detail(&snapshot),
                "Event updated successfully",
            )))
        }
        Err(err) => {
            warn!("Failed to update event {}: {}", event_id, err);
            Err(workflow_error(err))
        }
    }
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/api/events/{event_id}/",
    tag = "events",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
    ),
    responses(
        (status = 204, description = "Event deleted successfully"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the event owner", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller))]
pub async fn delete_event(
    Path(event_id): Path<i32>,
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<StatusCode, ApiError> {
    trace!("Entering delete_event function for event_id: {}", event_id);
    match workflow_event::delete_event(&state.db, &caller, event_id).await {
        Ok(()) => {
            info!("Event {} deleted", event_id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            warn!("Failed to delete event {}: {}", event_id, err);
            Err(workflow_error(err))
        }
    }
}

/// Apply to an event (artists, empty body) or drop candidates (event owner)
#[utoipa::path(
    patch,
    path = "/api/events/{event_id}/candidatures/",
    tag = "events",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
    ),
    request_body(content = Option<CandidatureRequest>, description = "Omit to apply; owners send remove_artists"),
    responses(
        (status = 200, description = "Application made, or candidates removed (event detail)", body = ApiResponse<CandidatureOutcome>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not allowed to change this event", body = ErrorResponse),
        (status = 404, description = "Event or artist not found", body = ErrorResponse),
        (status = 406, description = "Required fields missing", body = ErrorResponse),
        (status = 409, description = "Already applied or already in the lineup", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller, body))]
pub async fn update_candidatures(
    Path(event_id): Path<i32>,
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    body: Bytes,
) -> Result<Json<ApiResponse<CandidatureOutcome>>, ApiError> {
    trace!("Entering update_candidatures function for event_id: {}", event_id);
    let body = optional_json(&body)?;

    // An empty body is an application; the workflow rejects owners.
    if !caller.is_owner() || body.as_object().is_some_and(|object| object.is_empty()) {
        workflow_event::apply(&state.db, &caller, event_id)
            .await
            .map_err(|err| {
                warn!("User {} could not apply to event {}: {}", caller.id, event_id, err);
                workflow_error(err)
            })?;
        let applied = MessageResponse {
            msg: "Application made successfully".to_string(),
        };
        return Ok(Json(ApiResponse::new(
            CandidatureOutcome::Applied(applied),
            "Application made successfully",
        )));
    }

    fields::require(&body, &["remove_artists"]).map_err(workflow_error)?;
    let request: CandidatureRequest = parse(body)?;
    debug!("Removing candidates {:?} from event {}", request.remove_artists, event_id);

    match workflow_event::remove_candidatures(&state.db, &caller, event_id, &request.remove_artists).await {
        Ok(snapshot) => {
            info!("Candidatures of event {} updated", event_id);
            Ok(Json(ApiResponse::new(
                CandidatureOutcome::Updated(event_detail(&snapshot)),
                "Candidatures updated successfully",
            )))
        }
        Err(err) => {
            warn!("Failed to update candidatures of event {}: {}", event_id, err);
            Err(workflow_error(err))
        }
    }
}

/// Promote candidates into the lineup, all or nothing
#[utoipa::path(
    patch,
    path = "/api/events/{event_id}/lineup/",
    tag = "events",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
    ),
    request_body = LineupRequest,
    responses(
        (status = 200, description = "Lineup updated successfully", body = ApiResponse<EventDetail>),
        (status = 400, description = "Artist not a candidate, or performance after the event day", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the event owner", body = ErrorResponse),
        (status = 404, description = "Event or artist not found", body = ErrorResponse),
        (status = 406, description = "Required fields missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller, body))]
pub async fn update_lineup(
    Path(event_id): Path<i32>,
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<EventDetail>>, ApiError> {
    trace!("Entering update_lineup function for event_id: {}", event_id);
    fields::require(&body, &["lineup"]).map_err(workflow_error)?;
    let request: LineupRequest = parse(body)?;

    match workflow_event::promote(&state.db, &caller, event_id, &request.lineup).await {
        Ok(snapshot) => {
            info!("Lineup of event {} updated", event_id);
            Ok(Json(ApiResponse::new(
                event_detail(&snapshot),
                "Lineup updated successfully",
            )))
        }
        Err(err) => {
            warn!("Failed to update lineup of event {}: {}", event_id, err);
            Err(workflow_error(err))
        }
    }
}

use crate::handlers::{
    accounts::{
        create_account, delete_account, get_account, list_artists, list_owners, login,
        update_account,
    },
    events::{
        create_event, delete_event, get_event, list_events, update_candidatures, update_event,
        update_lineup,
    },
    feedbacks::{create_feedback, list_event_feedbacks, list_feedbacks},
    health::health_check,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    Router,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Accounts and login
        .route("/api/accounts/", post(create_account))
        .route("/api/accounts/artists/", get(list_artists))
        .route("/api/accounts/owners/", get(list_owners))
        .route(
            "/api/accounts/:account_id/",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route("/api/login/", post(login))
        // Events and their workflow
        .route("/api/events/", get(list_events).post(create_event))
        .route(
            "/api/events/:event_id/",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route(
            "/api/events/:event_id/candidatures/",
            patch(update_candidatures),
        )
        .route("/api/events/:event_id/lineup/", patch(update_lineup))
        // Feedback
        .route(
            "/api/events/:event_id/feedbacks/",
            get(list_event_feedbacks).post(create_feedback),
        )
        .route("/api/feedbacks/", get(list_feedbacks))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

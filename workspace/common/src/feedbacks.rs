use crate::accounts::UserSummary;
use crate::events::EventWithOwner;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Body for leaving feedback on a counterpart of an event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateFeedbackRequest {
    #[validate(length(min = 1))]
    pub description: String,
    pub stars: i32,
    /// Id of the user receiving the feedback
    pub addressed_user: i32,
}

/// Full feedback record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponse {
    pub id: i32,
    pub description: String,
    pub stars: i32,
    pub event: EventWithOwner,
    pub from_user: UserSummary,
    pub addressed_user: UserSummary,
}

/// Feedback as listed under its event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventFeedback {
    pub id: i32,
    pub description: String,
    pub stars: i32,
    pub event: EventWithOwner,
}

/// Filters for the feedback listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct FeedbackQuery {
    /// Only feedback sent by the caller
    pub sent: Option<bool>,
    /// Only feedback sent by this user
    #[serde(rename = "fromUser")]
    pub from_user: Option<i32>,
    /// Only feedback addressed to this user
    #[serde(rename = "addressedUser")]
    pub addressed_user: Option<i32>,
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
}

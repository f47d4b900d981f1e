//! Common transport-layer types shared by the HTTP layer and the workflow crate.
//! Every endpoint has its own explicit response shape; nothing is dropped from a
//! payload at runtime.

pub mod datetime;

mod accounts;
mod events;
mod feedbacks;

pub use accounts::{
    AccountResponse, ArtistAccount, CandidateProfile, CreateAccountRequest, LoginRequest,
    OwnerAccount, TokenResponse, UpdateAccountRequest, UserSummary,
};
pub use events::{
    Address, AddressPayload, CandidatureRequest, EventDetail, EventPayload, EventPublic,
    EventView, EventWithOwner, LineupEntry, LineupRequest, LineupSlot, MusicStyleName,
};
pub use feedbacks::{CreateFeedbackRequest, EventFeedback, FeedbackQuery, FeedbackResponse};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationError;

/// Generic API response wrapper used by every successful endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Role of an account. Owners create and run events, artists apply to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Artist,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Artist => "artist",
        }
    }
}

/// How an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum RepeatEvent {
    Weekly,
    Monthly,
    #[default]
    None,
}

pub(crate) fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

use crate::accounts::{CandidateProfile, UserSummary};
use crate::{RepeatEvent, non_negative};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Address sent inside an event payload.
///
/// An identical address already on file is reused instead of inserted again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Validate)]
pub struct AddressPayload {
    #[validate(length(min = 1, max = 255))]
    pub street: String,
    #[validate(length(min = 1, max = 255))]
    pub neighbourhood: String,
    pub number: i32,
    #[validate(length(min = 1, max = 255))]
    pub city: String,
    #[validate(length(min = 1, max = 255))]
    pub state: String,
}

/// Stored address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub id: i32,
    pub street: String,
    pub neighbourhood: String,
    pub number: i32,
    pub city: String,
    pub state: String,
}

/// Music style reference by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Validate)]
pub struct MusicStyleName {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Body for creating or fully replacing an event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct EventPayload {
    /// RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC)
    #[serde(deserialize_with = "crate::datetime::deserialize")]
    pub datetime: DateTime<Utc>,
    #[serde(default)]
    pub repeat_event: RepeatEvent,
    pub details: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    #[validate(custom(function = "non_negative"))]
    pub base_price: Decimal,
    #[validate(nested)]
    pub address: AddressPayload,
    #[validate(nested)]
    pub music_styles: Vec<MusicStyleName>,
}

/// Owner request removing artists from the candidature pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct CandidatureRequest {
    pub remove_artists: Vec<i32>,
}

/// One artist to move from the candidatures into the lineup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineupEntry {
    pub artist_id: i32,
    /// Must not fall on a later calendar day than the event
    #[serde(deserialize_with = "crate::datetime::deserialize")]
    pub performance_datetime: DateTime<Utc>,
}

/// Owner request promoting candidates into the lineup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LineupRequest {
    #[validate(length(min = 1))]
    pub lineup: Vec<LineupEntry>,
}

/// Confirmed performance slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineupSlot {
    pub artist: i32,
    pub performance_datetime: DateTime<Utc>,
}

/// Event as shown to artists and to owners of other events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventPublic {
    pub id: i32,
    pub datetime: DateTime<Utc>,
    pub repeat_event: RepeatEvent,
    pub details: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_price: Decimal,
    pub address: Address,
    pub music_styles: Vec<MusicStyleName>,
}

/// Event as shown to its owner, including the lineup and pending candidatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventDetail {
    pub id: i32,
    pub datetime: DateTime<Utc>,
    pub repeat_event: RepeatEvent,
    pub details: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_price: Decimal,
    pub address: Address,
    pub music_styles: Vec<MusicStyleName>,
    pub lineup: Vec<LineupSlot>,
    pub candidatures: Vec<CandidateProfile>,
}

/// Caller-dependent event shape.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum EventView {
    Detail(EventDetail),
    Public(EventPublic),
}

/// Event embedded in feedback, with its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventWithOwner {
    pub id: i32,
    pub datetime: DateTime<Utc>,
    pub repeat_event: RepeatEvent,
    pub details: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_price: Decimal,
    pub address: Address,
    pub music_styles: Vec<MusicStyleName>,
    pub owner: UserSummary,
}

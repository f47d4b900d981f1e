use crate::{Role, non_negative};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for registering an account.
///
/// Artists must also send `phone`, `solo` and `hour_price`; owners may omit them
/// and any value they send is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateAccountRequest {
    /// Username (must be unique)
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    /// Plain text password, stored as an Argon2 hash
    #[validate(length(min = 1))]
    pub password: String,
    /// Email address (must be unique)
    #[validate(email)]
    pub email: String,
    pub role: Role,
    #[validate(length(min = 1, max = 15))]
    pub phone: Option<String>,
    /// Whether the artist performs alone
    pub solo: Option<bool>,
    /// Hourly rate of the artist
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "non_negative"))]
    pub hour_price: Option<Decimal>,
}

/// Request body for a partial account update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,
    #[validate(length(min = 1))]
    pub password: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    /// Accepted only when equal to the current role
    pub role: Option<Role>,
    #[validate(length(min = 1, max = 15))]
    pub phone: Option<String>,
    pub solo: Option<bool>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "non_negative"))]
    pub hour_price: Option<Decimal>,
}

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Account as shown to anyone looking at an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OwnerAccount {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Account as shown to anyone looking at an artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArtistAccount {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub solo: Option<bool>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub hour_price: Option<Decimal>,
}

/// Role-dependent account shape.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AccountResponse {
    Artist(ArtistAccount),
    Owner(OwnerAccount),
}

impl AccountResponse {
    pub fn id(&self) -> i32 {
        match self {
            AccountResponse::Artist(artist) => artist.id,
            AccountResponse::Owner(owner) => owner.id,
        }
    }
}

/// Minimal user reference embedded in events and feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Artist profile shown to an event owner reviewing candidatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CandidateProfile {
    pub id: i32,
    pub username: String,
    pub phone: Option<String>,
    pub solo: Option<bool>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub hour_price: Option<Decimal>,
}

//! Shared fixtures for the workflow tests.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use common::{AddressPayload, CreateAccountRequest, EventPayload, MusicStyleName, RepeatEvent, Role};
use migration::{Migrator, MigratorTrait};
use model::entities::user;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};

use crate::account;

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn owner_request(username: &str) -> CreateAccountRequest {
    CreateAccountRequest {
        username: username.to_string(),
        password: "123".to_string(),
        email: format!("{}@example.com", username),
        role: Role::Owner,
        phone: None,
        solo: None,
        hour_price: None,
    }
}

pub async fn create_owner(db: &DatabaseConnection, username: &str) -> user::Model {
    account::register(db, owner_request(username), "hash".to_string())
        .await
        .expect("Failed to create owner")
}

pub async fn create_artist(db: &DatabaseConnection, username: &str) -> user::Model {
    let request = CreateAccountRequest {
        role: Role::Artist,
        phone: Some("70707070".to_string()),
        solo: Some(true),
        hour_price: Some(Decimal::new(999, 2)),
        ..owner_request(username)
    };
    account::register(db, request, "hash".to_string())
        .await
        .expect("Failed to create artist")
}

pub fn address_payload() -> AddressPayload {
    AddressPayload {
        street: "E 39th St".to_string(),
        neighbourhood: "Murray Hill".to_string(),
        number: 39,
        city: "New York".to_string(),
        state: "NY".to_string(),
    }
}

/// 20:00 UTC on a day a year from the first call, fixed for the whole run.
pub fn event_datetime() -> DateTime<Utc> {
    static EVENT_DAY: OnceLock<NaiveDate> = OnceLock::new();
    EVENT_DAY
        .get_or_init(|| (Utc::now() + Duration::days(365)).date_naive())
        .and_hms_opt(20, 0, 0)
        .expect("valid time of day")
        .and_utc()
}

/// Upcoming event at [`event_datetime`] with the "Rock" style.
pub fn event_payload() -> EventPayload {
    EventPayload {
        datetime: event_datetime(),
        repeat_event: RepeatEvent::None,
        details: "Rock night".to_string(),
        base_price: Decimal::new(1500, 2),
        address: address_payload(),
        music_styles: vec![MusicStyleName {
            name: "Rock".to_string(),
        }],
    }
}

use std::sync::OnceLock;
use std::time::Duration;

use crate::router::create_router;
use crate::schemas::AppState;
use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{DateTime, NaiveDate, Utc};
use migration::{Migrator, MigratorTrait};
use moka::future::Cache;
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Create an in-memory SQLite database for testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    // Run migrations
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create AppState for testing
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;
    AppState {
        db,
        token_cache: Cache::new(100),
        request_timeout: Duration::from_secs(30),
    }
}

/// Initialize tracing for tests with output to STDERR.
///
/// The level comes from RUST_LOG and defaults to WARN.
fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Create axum app for testing
pub async fn setup_test_app() -> Router {
    let _guard = init_test_tracing();
    let state = setup_test_app_state().await;
    create_router(state)
}

pub async fn setup_test_server() -> TestServer {
    TestServer::new(setup_test_app().await).expect("Failed to start test server")
}

pub fn owner_body(username: &str) -> Value {
    json!({
        "username": username,
        "password": "123",
        "email": format!("{}@example.com", username),
        "role": "owner"
    })
}

pub fn artist_body(username: &str) -> Value {
    json!({
        "username": username,
        "password": "123",
        "email": format!("{}@example.com", username),
        "role": "artist",
        "phone": "70707070",
        "solo": true,
        "hour_price": 9.99
    })
}

/// 20:00 UTC on a day a year from the first call, fixed for the whole run.
pub fn event_datetime() -> DateTime<Utc> {
    static EVENT_DAY: OnceLock<NaiveDate> = OnceLock::new();
    EVENT_DAY
        .get_or_init(|| (Utc::now() + chrono::Duration::days(365)).date_naive())
        .and_hms_opt(20, 0, 0)
        .expect("valid time of day")
        .and_utc()
}

/// `event_datetime() + offset` in the plain `YYYY-MM-DD HH:MM:SS` form.
pub fn event_time_plus(offset: chrono::Duration) -> String {
    (event_datetime() + offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Upcoming event at [`event_datetime`] at the Murray Hill address, tagged "Rock".
pub fn event_body() -> Value {
    json!({
        "datetime": event_time_plus(chrono::Duration::zero()),
        "details": "Rock night",
        "base_price": 15.0,
        "address": {
            "street": "E 39th St",
            "neighbourhood": "Murray Hill",
            "number": 39,
            "city": "New York",
            "state": "NY"
        },
        "music_styles": [{"name": "Rock"}]
    })
}

/// Registers an account, logs in and returns `(id, Authorization header value)`.
pub async fn register_and_login(server: &TestServer, body: Value) -> (i64, HeaderValue) {
    let username = body["username"].clone();
    let created = server.post("/api/accounts/").json(&body).await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["data"]["id"]
        .as_i64()
        .expect("account id");

    let login = server
        .post("/api/login/")
        .json(&json!({"username": username, "password": "123"}))
        .await;
    login.assert_status_ok();
    let token = login.json::<Value>()["data"]["token"]
        .as_str()
        .expect("token")
        .to_string();

    let header = HeaderValue::from_str(&format!("Token {}", token)).expect("header value");
    (id, header)
}

#[cfg(test)]
mod integration_tests {
    use crate::test_utils::{
        artist_body, event_body, event_datetime, event_time_plus, owner_body, register_and_login,
        setup_test_server,
    };
    use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
    use axum_test::TestServer;
    use chrono::Duration;
    use serde_json::{Value, json};

    /// Owner with one event, plus one artist. Returns `(event_id, owner, artist_id, artist)`.
    async fn owner_event_artist(server: &TestServer) -> (i64, HeaderValue, i64, HeaderValue) {
        let (_, owner) = register_and_login(server, owner_body("owner")).await;
        let (artist_id, artist) = register_and_login(server, artist_body("artist")).await;

        let created = server
            .post("/api/events/")
            .add_header(AUTHORIZATION, owner.clone())
            .json(&event_body())
            .await;
        created.assert_status(StatusCode::CREATED);
        let event_id = created.json::<Value>()["data"]["id"].as_i64().unwrap();
        (event_id, owner, artist_id, artist)
    }

    async fn apply(server: &TestServer, event_id: i64, token: &HeaderValue) -> axum_test::TestResponse {
        server
            .patch(&format!("/api/events/{}/candidatures/", event_id))
            .add_header(AUTHORIZATION, token.clone())
            .await
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = setup_test_server().await;
        let response = server.get("/health").await;
        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<Value>()["database"], "connected");
    }

    #[tokio::test]
    async fn test_create_owner_and_artist() {
        let server = setup_test_server().await;

        let response = server.post("/api/accounts/").json(&owner_body("owner")).await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Account created successfully");
        assert_eq!(body["data"]["role"], "owner");
        assert!(body["data"].get("password").is_none());
        assert!(body["data"].get("phone").is_none());

        let response = server.post("/api/accounts/").json(&artist_body("artist")).await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["role"], "artist");
        assert_eq!(body["data"]["phone"], "70707070");
        assert_eq!(body["data"]["hour_price"], 9.99);
    }

    #[tokio::test]
    async fn test_create_account_lists_missing_fields() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/accounts/")
            .json(&json!({"username": "artist", "password": "123", "role": "artist"}))
            .await;
        response.assert_status(StatusCode::NOT_ACCEPTABLE);
        let body: Value = response.json();
        assert_eq!(body["code"], "REQUIRED_FIELDS");
        assert_eq!(body["success"], false);
        assert_eq!(
            body["required_fields"],
            json!(["email", "phone", "solo", "hour_price"])
        );
    }

    #[tokio::test]
    async fn test_duplicate_account_conflicts() {
        let server = setup_test_server().await;
        server
            .post("/api/accounts/")
            .json(&owner_body("owner"))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.post("/api/accounts/").json(&owner_body("owner")).await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["error"], "User already exists!");
    }

    #[tokio::test]
    async fn test_login_errors() {
        let server = setup_test_server().await;
        server
            .post("/api/accounts/")
            .json(&owner_body("owner"))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/login/")
            .json(&json!({"username": "owner"}))
            .await;
        response.assert_status(StatusCode::NOT_ACCEPTABLE);
        assert_eq!(response.json::<Value>()["required_fields"], json!(["password"]));

        server
            .post("/api/login/")
            .json(&json!({"username": "owner", "password": 123}))
            .await
            .assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);

        server
            .post("/api/login/")
            .json(&json!({"username": "owner", "password": "wrong"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let first = server
            .post("/api/login/")
            .json(&json!({"username": "owner", "password": "123"}))
            .await;
        first.assert_status_ok();
        let second = server
            .post("/api/login/")
            .json(&json!({"username": "owner", "password": "123"}))
            .await;
        assert_eq!(
            first.json::<Value>()["data"]["token"],
            second.json::<Value>()["data"]["token"]
        );
    }

    #[tokio::test]
    async fn test_authentication_required() {
        let server = setup_test_server().await;

        server.get("/api/events/").await.assert_status(StatusCode::UNAUTHORIZED);

        let response = server
            .get("/api/events/")
            .add_header(AUTHORIZATION, HeaderValue::from_static("Token nope"))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_account_self_service() {
        let server = setup_test_server().await;
        let (owner_id, owner) = register_and_login(&server, owner_body("owner")).await;
        let (artist_id, artist) = register_and_login(&server, artist_body("artist")).await;

        let response = server
            .get(&format!("/api/accounts/{}/", artist_id))
            .add_header(AUTHORIZATION, owner.clone())
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["username"], "artist");

        server
            .get("/api/accounts/999/")
            .add_header(AUTHORIZATION, owner.clone())
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .put(&format!("/api/accounts/{}/", artist_id))
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"username": "hijacked"}))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let response = server
            .put(&format!("/api/accounts/{}/", owner_id))
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"role": "artist"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "role field cannot change");

        let response = server
            .put(&format!("/api/accounts/{}/", artist_id))
            .add_header(AUTHORIZATION, artist.clone())
            .json(&json!({"hour_price": 20.5, "solo": false}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["hour_price"], 20.5);
        assert_eq!(body["data"]["solo"], false);

        server
            .delete(&format!("/api/accounts/{}/", owner_id))
            .add_header(AUTHORIZATION, artist.clone())
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .delete(&format!("/api/accounts/{}/", artist_id))
            .add_header(AUTHORIZATION, artist.clone())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        // The token died with the account.
        server
            .get("/api/events/")
            .add_header(AUTHORIZATION, artist)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_role_listings() {
        let server = setup_test_server().await;
        register_and_login(&server, owner_body("owner")).await;
        register_and_login(&server, artist_body("artist-1")).await;
        register_and_login(&server, artist_body("artist-2")).await;

        let artists: Value = server.get("/api/accounts/artists/").await.json();
        assert_eq!(artists["data"].as_array().unwrap().len(), 2);

        let owners: Value = server.get("/api/accounts/owners/").await.json();
        assert_eq!(owners["data"].as_array().unwrap().len(), 1);
        assert_eq!(owners["data"][0]["username"], "owner");
    }

    #[tokio::test]
    async fn test_end_to_end_booking_flow() {
        let server = setup_test_server().await;
        let (event_id, owner, artist_id, artist) = owner_event_artist(&server).await;
        assert_eq!(event_id, 1);

        let detail: Value = server
            .get(&format!("/api/events/{}/", event_id))
            .add_header(AUTHORIZATION, owner.clone())
            .await
            .json();
        assert_eq!(detail["data"]["address"]["street"], "E 39th St");
        assert_eq!(detail["data"]["music_styles"], json!([{"name": "Rock"}]));

        let applied = apply(&server, event_id, &artist).await;
        applied.assert_status_ok();
        assert_eq!(
            applied.json::<Value>()["data"]["msg"],
            "Application made successfully"
        );

        let detail: Value = server
            .get(&format!("/api/events/{}/", event_id))
            .add_header(AUTHORIZATION, owner.clone())
            .await
            .json();
        assert_eq!(detail["data"]["candidatures"].as_array().unwrap().len(), 1);

        let response = server
            .patch(&format!("/api/events/{}/lineup/", event_id))
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({
                "lineup": [{"artist_id": artist_id, "performance_datetime": event_time_plus(Duration::hours(1))}]
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["lineup"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["lineup"][0]["artist"], artist_id);
        assert_eq!(body["data"]["candidatures"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_address_and_styles_are_shared() {
        let server = setup_test_server().await;
        let (_, owner) = register_and_login(&server, owner_body("owner")).await;

        let mut ids = Vec::new();
        for _ in 0..2 {
            let response = server
                .post("/api/events/")
                .add_header(AUTHORIZATION, owner.clone())
                .json(&event_body())
                .await;
            response.assert_status(StatusCode::CREATED);
            ids.push(response.json::<Value>()["data"]["address"]["id"].clone());
        }
        assert_eq!(ids[0], ids[1]);
    }

    #[tokio::test]
    async fn test_event_requires_fields_and_owner() {
        let server = setup_test_server().await;
        let (_, owner) = register_and_login(&server, owner_body("owner")).await;
        let (_, artist) = register_and_login(&server, artist_body("artist")).await;

        let response = server
            .post("/api/events/")
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"details": "x", "base_price": 1}))
            .await;
        response.assert_status(StatusCode::NOT_ACCEPTABLE);
        assert_eq!(
            response.json::<Value>()["required_fields"],
            json!(["datetime", "address", "music_styles"])
        );

        let mut negative = event_body();
        negative["base_price"] = json!(-1);
        server
            .post("/api/events/")
            .add_header(AUTHORIZATION, owner.clone())
            .json(&negative)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/events/")
            .add_header(AUTHORIZATION, artist)
            .json(&event_body())
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_artist_is_refused_before_payload_checks() {
        let server = setup_test_server().await;
        let (_, artist) = register_and_login(&server, artist_body("artist")).await;

        let response = server
            .post("/api/events/")
            .add_header(AUTHORIZATION, artist)
            .json(&json!({"details": "x"}))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn test_malformed_bodies_use_error_envelope() {
        let server = setup_test_server().await;
        let (_, owner) = register_and_login(&server, owner_body("owner")).await;

        let response = server
            .post("/api/accounts/")
            .content_type("application/json")
            .bytes("{".into())
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_JSON");
        assert_eq!(body["success"], false);

        let response = server
            .post("/api/events/")
            .add_header(AUTHORIZATION, owner)
            .text("not json")
            .await;
        response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(response.json::<Value>()["code"], "UNSUPPORTED_MEDIA_TYPE");

        let response = server
            .post("/api/login/")
            .content_type("application/json")
            .bytes("[1, 2".into())
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_event_cannot_move_before_its_lineup() {
        let server = setup_test_server().await;
        let (event_id, owner, artist_id, artist) = owner_event_artist(&server).await;
        let event_url = format!("/api/events/{}/", event_id);

        apply(&server, event_id, &artist).await.assert_status_ok();
        server
            .patch(&format!("/api/events/{}/lineup/", event_id))
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"lineup": [{"artist_id": artist_id, "performance_datetime": event_time_plus(Duration::hours(1))}]}))
            .await
            .assert_status_ok();

        let mut earlier = event_body();
        earlier["datetime"] = json!(event_time_plus(-Duration::days(30)));
        let response = server
            .put(&event_url)
            .add_header(AUTHORIZATION, owner.clone())
            .json(&earlier)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_TRANSITION");
        assert_eq!(
            body["error"],
            format!(
                "Performance datetime day is after event day for artist with id {}",
                artist_id
            )
        );

        let detail: Value = server
            .get(&event_url)
            .add_header(AUTHORIZATION, owner.clone())
            .await
            .json();
        assert_eq!(detail["data"]["datetime"], json!(event_datetime()));
        assert_eq!(detail["data"]["lineup"].as_array().unwrap().len(), 1);

        let mut later = event_body();
        later["datetime"] = json!(event_time_plus(Duration::days(2)));
        server
            .put(&event_url)
            .add_header(AUTHORIZATION, owner)
            .json(&later)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_event_views_depend_on_caller() {
        let server = setup_test_server().await;
        let (event_id, owner, _, artist) = owner_event_artist(&server).await;
        let (_, other_owner) = register_and_login(&server, owner_body("other")).await;

        let owner_list: Value = server
            .get("/api/events/")
            .add_header(AUTHORIZATION, owner.clone())
            .await
            .json();
        assert_eq!(owner_list["data"].as_array().unwrap().len(), 1);
        assert!(owner_list["data"][0].get("candidatures").is_some());

        let other_list: Value = server
            .get("/api/events/")
            .add_header(AUTHORIZATION, other_owner.clone())
            .await
            .json();
        assert!(other_list["data"].as_array().unwrap().is_empty());

        let artist_list: Value = server
            .get("/api/events/")
            .add_header(AUTHORIZATION, artist.clone())
            .await
            .json();
        assert_eq!(artist_list["data"].as_array().unwrap().len(), 1);
        assert!(artist_list["data"][0].get("candidatures").is_none());
        assert!(artist_list["data"][0].get("lineup").is_none());

        let public: Value = server
            .get(&format!("/api/events/{}/", event_id))
            .add_header(AUTHORIZATION, other_owner)
            .await
            .json();
        assert!(public["data"].get("lineup").is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_event() {
        let server = setup_test_server().await;
        let (event_id, owner, _, artist) = owner_event_artist(&server).await;

        let mut body = event_body();
        body["music_styles"] = json!([{"name": "Jazz"}, {"name": "Jazz"}, {"name": "Blues"}]);
        body["repeat_event"] = json!("Monthly");

        server
            .put(&format!("/api/events/{}/", event_id))
            .add_header(AUTHORIZATION, artist.clone())
            .json(&body)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let response = server
            .put(&format!("/api/events/{}/", event_id))
            .add_header(AUTHORIZATION, owner.clone())
            .json(&body)
            .await;
        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["data"]["repeat_event"], "Monthly");
        assert_eq!(
            updated["data"]["music_styles"],
            json!([{"name": "Jazz"}, {"name": "Blues"}])
        );

        server
            .delete(&format!("/api/events/{}/", event_id))
            .add_header(AUTHORIZATION, owner.clone())
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/events/{}/", event_id))
            .add_header(AUTHORIZATION, owner)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_owner_with_events_cannot_delete_account() {
        let server = setup_test_server().await;
        let (owner_id, owner) = register_and_login(&server, owner_body("owner")).await;
        server
            .post("/api/events/")
            .add_header(AUTHORIZATION, owner.clone())
            .json(&event_body())
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .delete(&format!("/api/accounts/{}/", owner_id))
            .add_header(AUTHORIZATION, owner)
            .await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_candidature_rules() {
        let server = setup_test_server().await;
        let (event_id, owner, artist_id, artist) = owner_event_artist(&server).await;

        apply(&server, event_id, &artist).await.assert_status_ok();
        apply(&server, event_id, &artist)
            .await
            .assert_status(StatusCode::CONFLICT);
        apply(&server, event_id, &owner)
            .await
            .assert_status(StatusCode::FORBIDDEN);
        apply(&server, 999, &artist)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let (_, other_owner) = register_and_login(&server, owner_body("other")).await;
        server
            .patch(&format!("/api/events/{}/candidatures/", event_id))
            .add_header(AUTHORIZATION, other_owner)
            .json(&json!({"remove_artists": [artist_id]}))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .patch(&format!("/api/events/{}/candidatures/", event_id))
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"remove_artists": [999]}))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let response = server
            .patch(&format!("/api/events/{}/candidatures/", event_id))
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"remove_artists": [artist_id]}))
            .await;
        response.assert_status_ok();
        assert!(response.json::<Value>()["data"]["candidatures"]
            .as_array()
            .unwrap()
            .is_empty());

        // Rejected artists may apply again.
        apply(&server, event_id, &artist).await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_lineup_errors_leave_state_unchanged() {
        let server = setup_test_server().await;
        let (event_id, owner, artist_id, artist) = owner_event_artist(&server).await;
        let lineup_url = format!("/api/events/{}/lineup/", event_id);

        // Not a candidate yet.
        let response = server
            .patch(&lineup_url)
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"lineup": [{"artist_id": artist_id, "performance_datetime": event_time_plus(Duration::hours(1))}]}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            format!("Artist with id {} not in candidatures", artist_id)
        );

        apply(&server, event_id, &artist).await.assert_status_ok();

        let response = server
            .patch(&lineup_url)
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"lineup": [{"artist_id": artist_id, "performance_datetime": event_time_plus(Duration::minutes(270))}]}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            format!(
                "Performance datetime day is after event day for artist with id {}",
                artist_id
            )
        );

        server
            .patch(&lineup_url)
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"lineup": [{"artist_id": 999, "performance_datetime": event_time_plus(Duration::hours(1))}]}))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .patch(&lineup_url)
            .add_header(AUTHORIZATION, artist.clone())
            .json(&json!({"lineup": [{"artist_id": artist_id, "performance_datetime": event_time_plus(Duration::hours(1))}]}))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .patch(&lineup_url)
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({}))
            .await
            .assert_status(StatusCode::NOT_ACCEPTABLE);

        let detail: Value = server
            .get(&format!("/api/events/{}/", event_id))
            .add_header(AUTHORIZATION, owner)
            .await
            .json();
        assert!(detail["data"]["lineup"].as_array().unwrap().is_empty());
        assert_eq!(detail["data"]["candidatures"][0]["id"], artist_id);
    }

    #[tokio::test]
    async fn test_feedback_flow() {
        let server = setup_test_server().await;
        let (event_id, owner, artist_id, artist) = owner_event_artist(&server).await;
        let feedback_url = format!("/api/events/{}/feedbacks/", event_id);

        apply(&server, event_id, &artist).await.assert_status_ok();

        // A candidate has not performed yet.
        server
            .post(&feedback_url)
            .add_header(AUTHORIZATION, artist.clone())
            .json(&json!({"description": "Nice venue", "stars": 4, "addressed_user": 1}))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .patch(&format!("/api/events/{}/lineup/", event_id))
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"lineup": [{"artist_id": artist_id, "performance_datetime": (event_datetime() + Duration::hours(1)).to_rfc3339()}]}))
            .await
            .assert_status_ok();

        let response = server
            .post(&feedback_url)
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"description": "Great set"}))
            .await;
        response.assert_status(StatusCode::NOT_ACCEPTABLE);
        assert_eq!(
            response.json::<Value>()["required_fields"],
            json!(["stars", "addressed_user"])
        );

        server
            .post(&feedback_url)
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"description": "Me", "stars": 1, "addressed_user": 1}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post(&feedback_url)
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"description": "Great set", "stars": 5, "addressed_user": artist_id}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["data"]["from_user"]["username"], "owner");
        assert_eq!(created["data"]["addressed_user"]["id"], artist_id);
        assert_eq!(created["data"]["event"]["owner"]["username"], "owner");

        server
            .post(&feedback_url)
            .add_header(AUTHORIZATION, owner.clone())
            .json(&json!({"description": "Again", "stars": 4, "addressed_user": artist_id}))
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .post(&feedback_url)
            .add_header(AUTHORIZATION, artist.clone())
            .json(&json!({"description": "Nice venue", "stars": 4, "addressed_user": 1}))
            .await
            .assert_status(StatusCode::CREATED);

        let listed: Value = server
            .get(&feedback_url)
            .add_header(AUTHORIZATION, artist.clone())
            .await
            .json();
        let items = listed["data"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].get("from_user").is_none());
        assert_eq!(items[0]["event"]["id"], event_id);

        let sent: Value = server
            .get("/api/feedbacks/?sent=true")
            .add_header(AUTHORIZATION, artist.clone())
            .await
            .json();
        assert_eq!(sent["data"].as_array().unwrap().len(), 1);
        assert_eq!(sent["data"][0]["addressed_user"]["id"], 1);

        let to_artist: Value = server
            .get(&format!("/api/feedbacks/?addressedUser={}", artist_id))
            .add_header(AUTHORIZATION, owner.clone())
            .await
            .json();
        assert_eq!(to_artist["data"].as_array().unwrap().len(), 1);

        let paged: Value = server
            .get("/api/feedbacks/?page=2&limit=1")
            .add_header(AUTHORIZATION, owner.clone())
            .await
            .json();
        assert_eq!(paged["data"].as_array().unwrap().len(), 1);
        assert_eq!(paged["data"][0]["from_user"]["id"], artist_id);

        let response = server
            .get("/api/feedbacks/?limit=0")
            .add_header(AUTHORIZATION, owner.clone())
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["success"], false);

        let response = server
            .get("/api/feedbacks/?page=first")
            .add_header(AUTHORIZATION, owner)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_feedback_on_missing_event() {
        let server = setup_test_server().await;
        let (_, owner) = register_and_login(&server, owner_body("owner")).await;

        server
            .get("/api/events/42/feedbacks/")
            .add_header(AUTHORIZATION, owner.clone())
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .post("/api/events/42/feedbacks/")
            .add_header(AUTHORIZATION, owner)
            .json(&json!({"description": "x", "stars": 1, "addressed_user": 1}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use studydesk::database::models::User;
use studydesk::types::Role;

#[tokio::test]
async fn minimal_entry_gets_defaults() {
    let app = TestApp::new();
    let (user, token) = app.user("ada@example.com", Role::Student).await;

    let reply = app
        .post("/api/journal", Some(&token), json!({ "sleepHours": 7, "userId": user.id }))
        .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["message"], "Journal created successfully");
    let journal = &reply.body["journal"];
    assert_eq!(journal["sleepHours"], 7);
    assert_eq!(journal["status"], "backlog");
    assert_eq!(journal["mood"], "calm");
    assert_eq!(journal["note"], serde_json::Value::Null);
    assert_eq!(journal["goal"], serde_json::Value::Null);
}

#[tokio::test]
async fn missing_user_id_is_a_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.user("ada@example.com", Role::Student).await;

    let reply = app.post("/api/journal", Some(&token), json!({ "sleepHours": 7 })).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Sleep hours and userId are required");
    assert!(reply.body["errors"]["userId"].is_array());

    let listed = app.get("/api/journal", Some(&token)).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn invalid_present_fields_are_a_generic_validation_failure() {
    let app = TestApp::new();
    let (user, token) = app.user("ada@example.com", Role::Student).await;

    let bodies = [
        json!({ "sleepHours": 30, "userId": user.id }),
        json!({ "sleepHours": 7, "userId": user.id, "mood": "angry" }),
    ];
    for body in bodies {
        let reply = app.post("/api/journal", Some(&token), body).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body["error"], "Validation failed");
        assert!(reply.body["errors"].is_object());
    }

    let reply = app.post("/api/journal", Some(&token), json!({ "userId": user.id })).await;
    assert_eq!(reply.body["error"], "Sleep hours and userId are required");
    assert_eq!(reply.body["errors"]["sleepHours"], json!(["Sleep hours are required"]));
}

#[tokio::test]
async fn collection_is_a_bare_array() {
    let app = TestApp::new();
    let (user, token) = app.user("ada@example.com", Role::Student).await;
    for hours in [6, 8] {
        app.post("/api/journal", Some(&token), json!({ "sleepHours": hours, "userId": user.id }))
            .await;
    }

    let reply = app.get("/api/journal", Some(&token)).await;
    assert_eq!(reply.status, StatusCode::OK);
    let entries = reply.body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["sleepHours"], 8);
}

#[tokio::test]
async fn anonymous_post_is_rejected_with_error_only() {
    let app = TestApp::new();
    let (user, _) = app.user("ada@example.com", Role::Student).await;

    let reply = app
        .post("/api/journal", Some("expired"), json!({ "sleepHours": 7, "userId": user.id }))
        .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn signed_token_for_unknown_user_cannot_post() {
    let app = TestApp::new();
    let (user, _) = app.user("ada@example.com", Role::Student).await;
    let ghost = User {
        id: "ghost".to_string(),
        ..user.clone()
    };

    let reply = app
        .post("/api/journal", Some(&app.token_for(&ghost)), json!({ "sleepHours": 7, "userId": user.id }))
        .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body, json!({ "error": "Unauthorized" }));
    assert_eq!(app.get("/api/journal", Some("any")).await.body, json!([]));
}

#[tokio::test]
async fn entry_can_be_edited_and_removed() {
    let app = TestApp::new();
    let (user, token) = app.user("ada@example.com", Role::Student).await;
    let created = app
        .post(
            "/api/journal",
            Some(&token),
            json!({ "sleepHours": 5, "userId": user.id, "note": "rough night" }),
        )
        .await;
    let id = created.body["journal"]["id"].as_i64().unwrap();

    let updated = app
        .patch(&format!("/api/journal/{}", id), Some(&token), json!({ "note": null, "mood": "stressed" }))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["note"], serde_json::Value::Null);
    assert_eq!(updated.body["data"]["mood"], "stressed");

    let bad = app
        .patch(&format!("/api/journal/{}", id), Some(&token), json!({ "sleepHours": 30 }))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad.body["errors"]["sleepHours"], json!(["Sleep hours must be between 1 and 24"]));

    let deleted = app.delete(&format!("/api/journal/{}", id), Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(app.get(&format!("/api/journal/{}", id), Some(&token)).await.status, StatusCode::NOT_FOUND);
}

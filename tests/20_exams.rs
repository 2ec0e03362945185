mod common;

use axum::http::StatusCode;
use common::{exam_body, TestApp};
use serde_json::json;
use studydesk::types::Role;

#[tokio::test]
async fn exam_lifecycle() {
    let app = TestApp::new();
    let (user, token) = app.user("ada@example.com", Role::Student).await;

    let created = app.post("/api/exams", Some(&token), exam_body(&user.id)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["success"], true);
    assert_eq!(created.body["message"], "exam created successfully");
    assert_eq!(created.body["data"]["answerOne"], "muhammad");
    assert_eq!(created.body["data"]["type"], "test");
    let id = created.body["data"]["id"].as_i64().unwrap();

    let fetched = app.get(&format!("/api/exams/{}", id), Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["title"], "Midterm");
    assert_eq!(fetched.body["data"]["user"]["email"], "ada@example.com");

    let updated = app
        .patch(&format!("/api/exams/{}", id), Some(&token), json!({ "status": "in_progress" }))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["message"], "exam updated successfully");
    assert_eq!(updated.body["data"]["status"], "in_progress");
    assert_eq!(updated.body["data"]["title"], "Midterm");

    let deleted = app.delete(&format!("/api/exams/{}", id), Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "exam deleted successfully");
    assert_eq!(deleted.body["data"]["id"], id);

    let gone = app.get(&format!("/api/exams/{}", id), Some(&token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["success"], false);
}

#[tokio::test]
async fn invalid_exam_returns_field_errors() {
    let app = TestApp::new();
    let (user, token) = app.user("ada@example.com", Role::Student).await;

    let mut body = exam_body(&user.id);
    body["title"] = json!("ab");
    body["q2"] = json!("short");
    let reply = app.post("/api/exams", Some(&token), body).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["success"], false);
    assert_eq!(reply.body["message"], "Validation failed");
    assert_eq!(reply.body["errors"]["title"], json!(["Title must be at least 3 characters"]));
    assert_eq!(reply.body["errors"]["q2"], json!(["Please write at least 10 characters"]));
    assert!(reply.body.get("error").is_none());

    let listed = app.get("/api/exams", Some(&token)).await;
    assert_eq!(listed.body["data"], json!([]));
}

#[tokio::test]
async fn header_without_valid_session_is_unauthorized() {
    let app = TestApp::new();
    let (user, _) = app.user("ada@example.com", Role::Student).await;

    let reply = app.post("/api/exams", Some("not-a-token"), exam_body(&user.id)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["message"], "Unauthorized access");
    assert_eq!(reply.body["error"], "Unauthorized");
}

#[tokio::test]
async fn patch_without_valid_session_leaves_the_exam_untouched() {
    let app = TestApp::new();
    let (user, token) = app.user("ada@example.com", Role::Student).await;
    let created = app.post("/api/exams", Some(&token), exam_body(&user.id)).await;
    let uri = format!("/api/exams/{}", created.body["data"]["id"]);
    let original = app.get(&uri, Some(&token)).await.body["data"].clone();

    let reply = app.patch(&uri, Some("not-a-token"), json!({ "title": "Hijacked" })).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "Unauthorized");

    let after = app.get(&uri, Some(&token)).await;
    assert_eq!(after.body["data"], original);
    assert_eq!(after.body["data"]["title"], "Midterm");
}

#[tokio::test]
async fn list_is_newest_first_for_everyone() {
    let app = TestApp::new();
    let (ada, ada_token) = app.user("ada@example.com", Role::Student).await;
    let (bob, bob_token) = app.user("bob@example.com", Role::Student).await;

    let mut first = exam_body(&ada.id);
    first["title"] = json!("First");
    app.post("/api/exams", Some(&ada_token), first).await;
    let mut second = exam_body(&bob.id);
    second["title"] = json!("Second");
    app.post("/api/exams", Some(&bob_token), second).await;

    let listed = app.get("/api/exams", Some(&ada_token)).await;
    let titles: Vec<&str> = listed.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|exam| exam["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[tokio::test]
async fn patch_of_missing_exam_is_not_found() {
    let app = TestApp::new();
    let (_, token) = app.user("ada@example.com", Role::Student).await;

    let reply = app.patch("/api/exams/999", Some(&token), json!({ "title": "Final" })).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Not found");
}

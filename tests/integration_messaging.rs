#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::missing_panics_doc,
    missing_debug_implementations,
    unreachable_pub,
    clippy::similar_names
)]
use reqwest::StatusCode;
use serde_json::json;

mod common;

const CONTENT: &str = "hi there, this is an anonymous note";

async fn fetch_messages(app: &common::TestApp, token: &str) -> Vec<serde_json::Value> {
    let resp = app
        .client
        .get(format!("{}/api/get-messages", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    body["messages"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_send_message_appends_exactly_one() {
    let app = common::TestApp::spawn().await;
    let alice = common::generate_username("alice");
    let token = app.register_verified_user(&alice).await;

    let resp = app
        .client
        .post(format!("{}/api/send-message", app.server_url))
        .json(&json!({ "username": alice, "content": CONTENT }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let messages = fetch_messages(&app, &token).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["content"], CONTENT);
    assert!(messages[0]["id"].as_str().is_some());
    assert!(messages[0]["createdAt"].as_str().is_some());
}

#[tokio::test]
async fn test_messages_are_listed_most_recent_first() {
    let app = common::TestApp::spawn().await;
    let alice = common::generate_username("alice");
    let token = app.register_verified_user(&alice).await;

    for content in ["first message, long enough", "second message, long enough"] {
        let resp = app
            .client
            .post(format!("{}/api/send-message", app.server_url))
            .json(&json!({ "username": alice, "content": content }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let messages = fetch_messages(&app, &token).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "second message, long enough");
    assert_eq!(messages[1]["content"], "first message, long enough");
}

#[tokio::test]
async fn test_send_to_unknown_username_is_not_found() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .post(format!("{}/api/send-message", app.server_url))
        .json(&json!({ "username": common::generate_username("ghost"), "content": CONTENT }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_send_to_non_accepting_user_is_forbidden() {
    let app = common::TestApp::spawn().await;
    let bob = common::generate_username("bob");
    let token = app.register_verified_user(&bob).await;

    let resp = app
        .client
        .post(format!("{}/api/accept-messages", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "acceptMessages": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .client
        .post(format!("{}/api/send-message", app.server_url))
        .json(&json!({ "username": bob, "content": CONTENT }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("not accepting"));

    // The rejected message was not stored
    assert!(fetch_messages(&app, &token).await.is_empty());
}

#[tokio::test]
async fn test_message_content_length_is_validated() {
    let app = common::TestApp::spawn().await;
    let alice = common::generate_username("alice");
    app.register_verified_user(&alice).await;

    for content in ["too short", &"x".repeat(301)] {
        let resp = app
            .client
            .post(format!("{}/api/send-message", app.server_url))
            .json(&json!({ "username": alice, "content": content }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_delete_removes_exactly_one_message() {
    let app = common::TestApp::spawn().await;
    let alice = common::generate_username("alice");
    let token = app.register_verified_user(&alice).await;

    for content in ["first message, long enough", "second message, long enough"] {
        app.client
            .post(format!("{}/api/send-message", app.server_url))
            .json(&json!({ "username": alice, "content": content }))
            .send()
            .await
            .unwrap();
    }

    let messages = fetch_messages(&app, &token).await;
    assert_eq!(messages.len(), 2);
    let target_id = messages[0]["id"].as_str().unwrap().to_string();
    let other_id = messages[1]["id"].as_str().unwrap().to_string();

    let resp = app
        .client
        .delete(format!("{}/api/delete-message/{target_id}", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let remaining = fetch_messages(&app, &token).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], other_id.as_str());

    // Deleting the same id again is a 404
    let resp = app
        .client
        .delete(format!("{}/api/delete-message/{target_id}", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cannot_delete_someone_elses_message() {
    let app = common::TestApp::spawn().await;
    let alice = common::generate_username("alice");
    let mallory = common::generate_username("mallory");
    let alice_token = app.register_verified_user(&alice).await;
    let mallory_token = app.register_verified_user(&mallory).await;

    app.client
        .post(format!("{}/api/send-message", app.server_url))
        .json(&json!({ "username": alice, "content": CONTENT }))
        .send()
        .await
        .unwrap();

    let messages = fetch_messages(&app, &alice_token).await;
    let message_id = messages[0]["id"].as_str().unwrap();

    let resp = app
        .client
        .delete(format!("{}/api/delete-message/{message_id}", app.server_url))
        .header("Authorization", format!("Bearer {mallory_token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Alice still has her message
    assert_eq!(fetch_messages(&app, &alice_token).await.len(), 1);
}

#[tokio::test]
async fn test_dashboard_endpoints_require_auth() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/api/get-messages", app.server_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .client
        .get(format!("{}/api/get-messages", app.server_url))
        .header("Authorization", "Bearer not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .client
        .delete(format!("{}/api/delete-message/{}", app.server_url, uuid::Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

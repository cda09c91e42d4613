#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::missing_panics_doc,
    missing_debug_implementations,
    unreachable_pub
)]
use reqwest::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_unknown_username_is_unique() {
    let app = common::TestApp::spawn().await;
    let username = common::generate_username("free");

    let resp = app
        .client
        .get(format!("{}/api/check-username-unique?username={username}", app.server_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Username is unique");
}

#[tokio::test]
async fn test_verified_holder_blocks_username() {
    let app = common::TestApp::spawn().await;
    let username = common::generate_username("taken");
    app.register_verified_user(&username).await;

    let resp = app
        .client
        .get(format!("{}/api/check-username-unique?username={username}", app.server_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username is already taken");
}

#[tokio::test]
async fn test_unverified_holder_does_not_block_username() {
    let app = common::TestApp::spawn().await;
    let username = common::generate_username("pending");

    let resp = app
        .client
        .post(format!("{}/api/sign-up", app.server_url))
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "password12345",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .client
        .get(format!("{}/api/check-username-unique?username={username}", app.server_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_username_is_rejected_before_lookup() {
    let app = common::TestApp::spawn().await;

    for bad in ["a", "has%20space", "way_too_long_for_a_username_here"] {
        let resp = app
            .client
            .get(format!("{}/api/check-username-unique?username={bad}", app.server_url))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{bad} should fail validation");
    }

    // Missing query parameter entirely
    let resp = app
        .client
        .get(format!("{}/api/check-username-unique", app.server_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::missing_panics_doc,
    missing_debug_implementations,
    unreachable_pub
)]
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_suggestions_come_back_as_structured_array() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.post(format!("{}/api/suggest-messages", app.server_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0], "What made you smile today?");
}

#[tokio::test]
async fn test_request_body_is_ignored() {
    let app = common::TestApp::spawn().await;

    // Clients of older iterations sent assorted bodies; all are accepted
    let resp = app
        .client
        .post(format!("{}/api/suggest-messages", app.server_url))
        .json(&serde_json::json!({ "anything": "goes" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upstream_failure_surfaces_its_message() {
    let options = common::TestOptions {
        generator: common::StubGenerator { response: Err("quota exceeded for model".to_string()) },
        ..Default::default()
    };
    let app = common::TestApp::spawn_with(options).await;

    let resp = app.client.post(format!("{}/api/suggest-messages", app.server_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "quota exceeded for model");
}

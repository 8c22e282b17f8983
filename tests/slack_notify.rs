//! Slack notifier tests against a mocked Slack Web API.

use pamjit::error::SlackError;
use pamjit::slack::SlackClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn post_message_sends_exactly_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .and(header("Authorization", "Bearer xoxb-test"))
        .and(body_json(json!({
            "channel": "C123",
            "text": "Approve or inspect: https://approve.example/ent-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = SlackClient::with_base_url(&server.uri(), "xoxb-test").unwrap();
    let result = client
        .post_message("C123", "Approve or inspect: https://approve.example/ent-1")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn post_message_surfaces_api_failure() {
    let server = MockServer::start().await;

    // Slack reports API failures as HTTP 200 with ok=false.
    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error": "channel_not_found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SlackClient::with_base_url(&server.uri(), "xoxb-test").unwrap();
    let err = client.post_message("C123", "hello").await.unwrap_err();

    assert!(matches!(err, SlackError::Api(_)));
    assert!(err.to_string().contains("channel_not_found"));
}

#[tokio::test]
async fn post_message_surfaces_http_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = SlackClient::with_base_url(&server.uri(), "xoxb-test").unwrap();
    let err = client.post_message("C123", "hello").await.unwrap_err();

    assert!(err.to_string().contains("HTTP 500"));
}

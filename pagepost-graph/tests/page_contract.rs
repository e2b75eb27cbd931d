//! Page client contract tests.
//!
//! Verify the request shape sent to the feed and photos edges and the
//! mapping of Graph API responses onto receipts and errors.

use pagepost_graph::{GraphConfig, GraphError, PageClient};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PageClient {
    let config = GraphConfig::new("1234", "page-token").with_base_url(server.uri());
    PageClient::new(config).expect("valid config")
}

// ────────────────────────────────────────────────────────────────────────────
// Feed edge
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn post_text_sends_form_with_message_and_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1234/feed"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("message=Chapter+three+is+live"))
        .and(body_string_contains("access_token=page-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1234_5678"})))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client_for(&server)
        .post_text("Chapter three is live")
        .await
        .expect("post succeeds");

    assert_eq!(receipt.id, "1234_5678");
    assert_eq!(receipt.feed_id(), "1234_5678");
}

#[tokio::test]
async fn post_text_respects_api_version_override() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v19.0/1234/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = GraphConfig::new("1234", "page-token")
        .with_base_url(server.uri())
        .with_api_version("v19.0");
    let client = PageClient::new(config).expect("valid config");

    assert!(client.post_text("hello").await.is_ok());
}

#[tokio::test]
async fn post_text_maps_graph_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1234/feed"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "message": "Error validating access token",
                "type": "OAuthException",
                "code": 190
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).post_text("hello").await.unwrap_err();

    match err {
        GraphError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("Error validating access token"));
            assert!(message.contains("190"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn post_text_keeps_raw_body_for_non_json_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1234/feed"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).post_text("hello").await.unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert!(err.to_string().contains("upstream unavailable"));
}

#[tokio::test]
async fn post_text_rejects_unexpected_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1234/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let err = client_for(&server).post_text("hello").await.unwrap_err();
    assert!(matches!(err, GraphError::Parse(_)));
}

#[tokio::test]
async fn post_text_accepts_success_without_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1234/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let receipt = client_for(&server)
        .post_text("hello")
        .await
        .expect("accepted post is not an error");
    assert_eq!(receipt.id, "");
    assert_eq!(receipt.feed_id(), "");
}

// ────────────────────────────────────────────────────────────────────────────
// Photos edge
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn post_photo_uploads_multipart_source_and_caption() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1234/photos"))
        .and(body_string_contains("name=\"caption\""))
        .and(body_string_contains("Day one of the countdown"))
        .and(body_string_contains("name=\"access_token\""))
        .and(body_string_contains("name=\"source\"; filename=\"post-2025-11-02-day01.png\""))
        .and(body_string_contains("image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "9001",
            "post_id": "1234_9001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Body matchers need UTF-8, so the payload stands in for real PNG bytes.
    let png = b"fake-png-bytes".to_vec();
    let receipt = client_for(&server)
        .post_photo(png, "post-2025-11-02-day01.png", "Day one of the countdown")
        .await
        .expect("upload succeeds");

    assert_eq!(receipt.id, "9001");
    assert_eq!(receipt.feed_id(), "1234_9001");
}

#[tokio::test]
async fn post_photo_surfaces_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1234/photos"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"message": "(#200) Permissions error"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .post_photo(vec![1, 2, 3], "x.png", "caption")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("Permissions error"));
}

#[tokio::test]
async fn unreachable_host_is_http_error() {
    // Port 9 (discard) on localhost is not expected to accept connections.
    let config = GraphConfig::new("1234", "page-token")
        .with_base_url("http://127.0.0.1:9")
        .with_timeout_seconds(2);
    let client = PageClient::new(config).expect("valid config");

    let err = client.post_text("hello").await.unwrap_err();
    assert!(matches!(err, GraphError::Http(_)));
}

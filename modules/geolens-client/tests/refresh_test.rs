//! The token refresh protocol, exercised through the real transport with a
//! scripted sender.
//!
//! MOCK → FUNCTION → OUTPUT: script the wire responses, call a real client
//! method, assert on what went out (order, credentials, refresh calls) and
//! what the caller saw.

use std::sync::Arc;

use serde_json::json;

use geolens_client::testing::MockSender;
use geolens_client::{GeoLensClient, MemorySession, SessionStore};
use geolens_common::error::GeoLensError;
use geolens_common::TokenPair;

const BASE: &str = "http://localhost:8000/api";

fn tokens(access: &str, refresh: &str) -> TokenPair {
    TokenPair {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
    }
}

fn user_json() -> serde_json::Value {
    json!({
        "id": "7a1d3f9e-2b4c-4d6e-8f0a-1c3e5a7b9d02",
        "email": "owner@example.com",
        "is_active": true
    })
}

fn client_with(
    sender: Arc<MockSender>,
    session: Arc<MemorySession>,
) -> GeoLensClient {
    GeoLensClient::with_parts(BASE, sender, session)
}

#[tokio::test]
async fn expired_access_token_is_refreshed_and_the_request_resubmitted() {
    let sender = Arc::new(
        MockSender::new()
            .respond_status(401, "token expired")
            .respond_json(200, json!({ "access_token": "fresh-access" }))
            .respond_json(200, user_json()),
    );
    let session = Arc::new(MemorySession::with_tokens(tokens("stale-access", "refresh-1")));
    let client = client_with(sender.clone(), session.clone());

    let account = client.me().await.expect("retried request should succeed");
    assert_eq!(account.email, "owner@example.com");

    let requests = sender.requests();
    assert_eq!(requests.len(), 3);

    // Original request went out with the stale token.
    assert_eq!(requests[0].bearer.as_deref(), Some("stale-access"));

    // The refresh call bypassed the hooks: no bearer, refresh token in body.
    assert!(requests[1].url.ends_with("/auth/refresh"));
    assert!(requests[1].bearer.is_none());
    assert_eq!(
        requests[1].body.as_ref().and_then(|b| b["refresh_token"].as_str()),
        Some("refresh-1")
    );

    // The resubmission read the token the refresh just wrote.
    assert_eq!(requests[2].bearer.as_deref(), Some("fresh-access"));
    assert_eq!(session.access_token().as_deref(), Some("fresh-access"));
    assert_eq!(session.refresh_token().as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn a_second_unauthorized_response_is_never_retried() {
    let sender = Arc::new(
        MockSender::new()
            .respond_status(401, "token expired")
            .respond_json(200, json!({ "access_token": "fresh-access" }))
            .respond_status(401, "still unauthorized"),
    );
    let session = Arc::new(MemorySession::with_tokens(tokens("stale-access", "refresh-1")));
    let client = client_with(sender.clone(), session);

    let error = client.me().await.expect_err("second 401 must surface");
    assert!(matches!(error, GeoLensError::Api { status: 401, .. }));

    // Exactly one refresh call, exactly three requests total: no loop.
    assert_eq!(sender.requests_to("/auth/refresh").len(), 1);
    assert_eq!(sender.request_count(), 3);
}

#[tokio::test]
async fn refresh_failure_clears_the_session() {
    let sender = Arc::new(
        MockSender::new()
            .respond_status(401, "token expired")
            .respond_status(401, "refresh token revoked")
            .respond_status(401, "unauthenticated"),
    );
    let session = Arc::new(MemorySession::with_tokens(tokens("stale-access", "refresh-1")));
    let client = client_with(sender.clone(), session.clone());

    let error = client.me().await.expect_err("rejected refresh must surface");
    assert!(matches!(error, GeoLensError::SessionExpired(_)));
    assert!(session.access_token().is_none());
    assert!(session.refresh_token().is_none());

    // A follow-up request goes out unauthenticated, with no stale credential.
    let _ = client.me().await;
    let requests = sender.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[2].bearer.is_none());
}

#[tokio::test]
async fn missing_refresh_token_surfaces_the_original_error() {
    let sender = Arc::new(MockSender::new().respond_status(401, "unauthenticated"));
    let session = Arc::new(MemorySession::new());
    let client = client_with(sender.clone(), session);

    let error = client.me().await.expect_err("401 must surface unchanged");
    assert!(matches!(error, GeoLensError::Api { status: 401, .. }));

    // No refresh attempt, no retry.
    assert_eq!(sender.request_count(), 1);
    assert!(sender.requests_to("/auth/refresh").is_empty());
}

#[tokio::test]
async fn non_authorization_errors_pass_through_untouched() {
    let sender = Arc::new(MockSender::new().respond_status(500, "upstream crawler exploded"));
    let session = Arc::new(MemorySession::with_tokens(tokens("good-access", "refresh-1")));
    let client = client_with(sender.clone(), session.clone());

    let error = client.me().await.expect_err("500 must surface");
    match error {
        GeoLensError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream crawler exploded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(sender.request_count(), 1);
    // Tokens untouched.
    assert_eq!(session.access_token().as_deref(), Some("good-access"));
}

#[tokio::test]
async fn requests_without_a_session_go_out_unauthenticated() {
    let sender = Arc::new(MockSender::new().respond_json(200, user_json()));
    let client = client_with(sender.clone(), Arc::new(MemorySession::new()));

    client.me().await.expect("request should succeed");
    assert!(sender.requests()[0].bearer.is_none());
}

#[tokio::test]
async fn missing_resources_map_to_not_found() {
    let sender = Arc::new(MockSender::new().respond_status(404, "Report not found"));
    let client = client_with(sender.clone(), Arc::new(MemorySession::new()));

    let error = client
        .report(uuid::Uuid::new_v4())
        .await
        .expect_err("404 must map to NotFound");
    assert!(matches!(error, GeoLensError::NotFound(_)));
}

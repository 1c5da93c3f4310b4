//! Interactions webhook integration tests

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use role_warden::store::{AllowedRoleStore, LoadOutcome};
use role_warden::RoleId;

mod common;

use common::{command, MemoryGuild, TestApp, ADMIN_ROLE, SUPPORT_ROLE};

async fn reply_content(app: &TestApp, body: Value) -> String {
    let response = app
        .router
        .clone()
        .oneshot(app.signed_request(&body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let reply: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(reply["type"], 4);
    assert_eq!(reply["data"]["flags"], 64, "replies must be ephemeral");
    reply["data"]["content"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_ping_pong() {
    let app = TestApp::new(MemoryGuild::default()).await;

    let response = app
        .router
        .clone()
        .oneshot(app.signed_request(&json!({ "id": "1", "type": 1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "type": 1 }));
}

#[tokio::test]
async fn test_missing_signature_rejected() {
    let app = TestApp::new(MemoryGuild::default()).await;

    let req = Request::builder()
        .method("POST")
        .uri("/interactions")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"id":"1","type":1}"#))
        .unwrap();
    let response = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error_code"], "missing_signature");
}

#[tokio::test]
async fn test_malformed_signature_rejected() {
    let app = TestApp::new(MemoryGuild::default()).await;

    let signed = app.signed_request(&json!({ "id": "1", "type": 1 }));
    let (mut parts, body) = signed.into_parts();
    parts
        .headers
        .insert("x-signature-ed25519", "zz".parse().unwrap());

    let response = app
        .router
        .clone()
        .oneshot(Request::from_parts(parts, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error_code"], "invalid_signature");
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let app = TestApp::new(MemoryGuild::default()).await;

    // Correctly signed, but twice the accepted size
    let padding = "x".repeat(2 * 1024 * 1024);
    let req = app.signed_request(&json!({ "id": "1", "type": 1, "padding": padding }));

    let response = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error_code"], "payload_too_large");
}

#[tokio::test]
async fn test_tampered_body_rejected() {
    let app = TestApp::new(MemoryGuild::default()).await;

    let signed = app.signed_request(&json!({ "id": "1", "type": 1 }));
    let (parts, _) = signed.into_parts();
    let forged = Request::from_parts(parts, Body::from(r#"{"id":"2","type":1}"#));

    let response = app.router.clone().oneshot(forged).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error_code"], "invalid_signature");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new(MemoryGuild::default()).await;

    let response = app
        .router
        .clone()
        .oneshot(app.signed_request(&json!({ "type": "not-a-number" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_command_no_content() {
    let app = TestApp::new(MemoryGuild::default()).await;

    let response = app
        .router
        .clone()
        .oneshot(app.signed_request(&command("kick", &[ADMIN_ROLE], json!([]))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_health_needs_no_signature() {
    let app = TestApp::new(MemoryGuild::default()).await;

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_allow_grant_revoke_e2e() {
    let app = TestApp::new(MemoryGuild::default().with_member("77")).await;
    let role = json!([{ "name": "role", "type": 8, "value": "11" }]);
    let target = json!([
        { "name": "user", "type": 6, "value": "77" },
        { "name": "role", "type": 8, "value": "11" }
    ]);

    // 1. Support cannot edit the allow-list
    let content = reply_content(&app, command("add", &[SUPPORT_ROLE], role.clone())).await;
    assert_eq!(content, "Admin only");

    // 2. Support cannot grant a role that is not allowed
    let content = reply_content(&app, command("grant", &[SUPPORT_ROLE], target.clone())).await;
    assert_eq!(content, "Role not allowed");

    // 3. Admin allows the role
    let content = reply_content(&app, command("add", &[ADMIN_ROLE], role.clone())).await;
    assert_eq!(content, "Added <@&11> to allowed roles");

    // 4. Anyone can list
    let content = reply_content(&app, command("roles", &[], json!([]))).await;
    assert_eq!(content, "Allowed roles:\n<@&11>");

    // 5. Support grants it
    let content = reply_content(&app, command("grant", &[SUPPORT_ROLE], target.clone())).await;
    assert_eq!(content, "Granted <@&11> to <@77>");
    assert_eq!(app.guild.roles_of("77"), vec![RoleId::new("11")]);

    // 6. Support revokes it
    let content = reply_content(&app, command("ungrant", &[SUPPORT_ROLE], target.clone())).await;
    assert_eq!(content, "Removed <@&11> from <@77>");
    assert!(app.guild.roles_of("77").is_empty());

    // 7. The allow-list survived to disk
    match AllowedRoleStore::read(&app.state_file()).await {
        LoadOutcome::Loaded(set) => assert_eq!(set.to_vec(), vec![RoleId::new("11")]),
        other => panic!("Expected persisted allow-list, got: {:?}", other),
    }
}

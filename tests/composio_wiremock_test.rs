//! Composio HTTP contract tests using wiremock
//!
//! Runs `SharePointComponent` against a mock Composio server to pin the
//! request shape (path, api key header, body) and response handling.

use std::sync::Arc;
use std::time::Duration;

use composio_sharepoint::{
    actions, ActionHandle, ActionSelection, ComposioConfig, ComposioToolset,
    ComposioToolsetFactory, Credentials, SharePointComponent, SharePointError, Toolset,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// HELPERS
// =============================================================================

fn execute_path(identifier: &str) -> String {
    format!("/api/v2/actions/{}/execute", identifier)
}

fn component_for(server: &MockServer) -> SharePointComponent {
    let config = ComposioConfig::default().with_base_url(server.uri());
    let mut component = SharePointComponent::with_toolset_factory(Arc::new(
        ComposioToolsetFactory::new(config, "sharepoint"),
    ));
    component.api_key = "test_key".to_string();
    component
}

// =============================================================================
// REQUEST SHAPE
// =============================================================================

#[tokio::test]
async fn test_find_user_request_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(execute_path(actions::FIND_USER)))
        .and(header("x-api-key", "test_key"))
        .and(body_json(json!({
            "entityId": "default",
            "appName": "sharepoint",
            "input": {"email": "user@example.com"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "successfull": true,
            "data": {"user": {"Id": 7, "Email": "user@example.com"}},
            "error": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut component = component_for(&mock_server);
    component.action = ActionSelection::named("Find User");
    component.email = Some("user@example.com".to_string());

    let result = component.execute_action().await.unwrap();
    assert_eq!(
        result.into_value(),
        json!({"user": {"Id": 7, "Email": "user@example.com"}})
    );
}

#[tokio::test]
async fn test_empty_fields_not_sent_over_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(execute_path(actions::CREATE_FOLDER)))
        .and(body_json(json!({
            "entityId": "site-owners",
            "appName": "sharepoint",
            "input": {"folder_name": "Reports"}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"successful": true, "data": {"created": true}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut component = component_for(&mock_server);
    component.entity_id = "site-owners".to_string();
    component.action = ActionSelection::named("Create Folder");
    component.folder_name = Some("Reports".to_string());
    component.relative_path = Some(String::new());

    let result = component.execute_action().await.unwrap();
    assert!(result.is_success());
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

#[tokio::test]
async fn test_flagged_failure_from_api() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(execute_path(actions::REMOVE_USER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "successfull": false,
            "data": {},
            "error": {"code": 404, "message": "User not found"}
        })))
        .mount(&mock_server)
        .await;

    let mut component = component_for(&mock_server);
    component.action = ActionSelection::named("Remove User");
    component.email = Some("ghost@example.com".to_string());

    let value = component.execute_action().await.unwrap().into_value();
    assert_eq!(
        value,
        json!({"code": 404, "message": "User not found", "errors": [], "status": null})
    );
}

#[tokio::test]
async fn test_http_error_is_raised_with_display_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&mock_server)
        .await;

    let mut component = component_for(&mock_server);
    component.action = ActionSelection::named("Create User");

    let err = component.execute_action().await.unwrap_err();
    assert!(err.to_string().starts_with("Failed to execute Create User:"));
    match err.root() {
        SharePointError::HttpStatus { status, body } => {
            assert_eq!(*status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let mut component = component_for(&mock_server);
    component.action = ActionSelection::named("Find User");

    let err = component.execute_action().await.unwrap_err();
    assert!(matches!(err.root(), SharePointError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_toolset_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"successful": true, "data": {}}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = ComposioConfig::default()
        .with_base_url(mock_server.uri())
        .with_timeout(Duration::from_millis(200));
    let toolset =
        ComposioToolset::new(&config, &Credentials::new("test_key", "default"), "sharepoint")
            .unwrap();

    let handle = ActionHandle::new("sharepoint", actions::FIND_USER);
    let err = toolset
        .execute(&handle, Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SharePointError::Transport(_)));
}

#[tokio::test]
async fn test_invalid_action_never_hits_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut component = component_for(&mock_server);
    component.action = ActionSelection::named("Invalid Action");

    let err = component.execute_action().await.unwrap_err();
    assert!(err.to_string().contains("Invalid action: Invalid Action"));
}

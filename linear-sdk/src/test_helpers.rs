// ABOUTME: Test helper utilities for mocking Linear API responses and server
// ABOUTME: Provides mockito-based helpers for unit testing API interactions

use crate::LinearClient;
use mockito::{Matcher, Mock, Server, ServerGuard};
use secrecy::SecretString;
use serde_json::json;

pub async fn mock_linear_server() -> ServerGuard {
    Server::new_async().await
}

pub fn test_client(server: &ServerGuard) -> LinearClient {
    LinearClient::builder()
        .auth_token(SecretString::new("lin_api_test".to_string().into_boxed_str()))
        .base_url(Some(server.url()))
        .build()
        .unwrap()
}

/// Register a mock answering the GraphQL operation with the given name.
pub async fn mock_operation(
    server: &mut ServerGuard,
    operation_name: &str,
    response: serde_json::Value,
) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(
            json!({ "operationName": operation_name }),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(response.to_string())
        .create_async()
        .await
}

pub fn mock_viewer_response() -> serde_json::Value {
    json!({
        "data": {
            "viewer": {
                "id": "test-user-id",
                "name": "Test User",
                "email": "test@example.com",
                "organization": { "name": "Acme", "urlKey": "acme" }
            }
        }
    })
}

pub fn mock_teams_response() -> serde_json::Value {
    json!({
        "data": {
            "teams": {
                "nodes": [
                    { "id": "team-eng-uuid", "key": "ENG", "name": "Engineering" },
                    { "id": "team-design-uuid", "key": "DESIGN", "name": "Design Engineering" }
                ]
            }
        }
    })
}

pub fn mock_projects_response() -> serde_json::Value {
    json!({
        "data": {
            "projects": {
                "nodes": [
                    {
                        "id": "project-phase-10",
                        "name": "Phase 10 Rollout",
                        "url": "https://linear.app/acme/project/phase-10",
                        "status": { "id": "ps-started", "name": "In Progress", "type": "started" }
                    },
                    {
                        "id": "project-phase-1",
                        "name": "Phase 1",
                        "url": "https://linear.app/acme/project/phase-1",
                        "status": { "id": "ps-started", "name": "In Progress", "type": "started" }
                    }
                ]
            }
        }
    })
}

pub fn mock_empty_nodes(field: &str) -> serde_json::Value {
    let mut data = serde_json::Map::new();
    data.insert(field.to_string(), json!({ "nodes": [] }));
    json!({ "data": data })
}

pub fn mock_issue_response(identifier: &str, state_name: &str, state_type: &str) -> serde_json::Value {
    json!({
        "data": {
            "issues": {
                "nodes": [
                    {
                        "id": format!("id-{identifier}"),
                        "identifier": identifier,
                        "title": format!("Issue {identifier}"),
                        "url": format!("https://linear.app/acme/issue/{identifier}"),
                        "state": { "id": "state-current", "name": state_name, "type": state_type },
                        "team": { "id": "team-eng-uuid", "key": "ENG", "name": "Engineering" },
                        "parent": null,
                        "labels": { "nodes": [] }
                    }
                ]
            }
        }
    })
}

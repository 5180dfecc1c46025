// ABOUTME: Shared helpers for command-level tests against a mocked Linear API
// ABOUTME: Mocks match on GraphQL operation name and, where needed, on variables

#![allow(dead_code)]

use linear_ops::cli_output::CliOutput;
use linear_ops::commands::{self, Context};
use linear_ops::config::Config;
use mockito::{Matcher, Mock, Server, ServerGuard};
use secrecy::SecretString;
use serde_json::{Value, json};

pub async fn mock_linear_server() -> ServerGuard {
    Server::new_async().await
}

/// Config pointed at the mock server with no pause between mutations
pub fn test_config(server: &ServerGuard) -> Config {
    Config {
        api_url: Some(server.url()),
        sync_delay_ms: Some(0),
        ..Default::default()
    }
}

pub fn test_context<'a>(config: &'a Config, out: &'a CliOutput) -> Context<'a> {
    let key = SecretString::new("lin_api_test".to_string().into_boxed_str());
    let client = commands::build_client_with_key(config, key).unwrap();
    Context::new(client, config, out)
}

/// Register a mock for a GraphQL operation, expecting `hits` calls
pub async fn mock_operation(
    server: &mut ServerGuard,
    operation_name: &str,
    response: Value,
    hits: usize,
) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(
            json!({ "operationName": operation_name }),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(response.to_string())
        .expect(hits)
        .create_async()
        .await
}

/// Register a FindIssue mock for one team key and number
pub async fn mock_find_issue(
    server: &mut ServerGuard,
    team_key: &str,
    number: u32,
    response: Value,
) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "FindIssue",
            "variables": { "teamKey": team_key, "number": f64::from(number) }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(response.to_string())
        .create_async()
        .await
}

pub fn empty_nodes(field: &str) -> Value {
    let mut data = serde_json::Map::new();
    data.insert(field.to_string(), json!({ "nodes": [] }));
    json!({ "data": data })
}

pub fn issue_response(identifier: &str, state_name: &str, state_type: &str) -> Value {
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

pub fn team_states_response() -> Value {
    json!({
        "data": {
            "team": {
                "states": {
                    "nodes": [
                        { "id": "s-backlog", "name": "Backlog", "type": "backlog" },
                        { "id": "s-todo", "name": "Todo", "type": "unstarted" },
                        { "id": "s-progress", "name": "In Progress", "type": "started" },
                        { "id": "s-done", "name": "Done", "type": "completed" },
                        { "id": "s-canceled", "name": "Canceled", "type": "canceled" }
                    ]
                }
            }
        }
    })
}

pub fn team_labels_response() -> Value {
    json!({
        "data": {
            "team": {
                "labels": {
                    "nodes": [
                        { "id": "l-bug", "name": "bug" },
                        { "id": "l-security", "name": "security" }
                    ]
                }
            }
        }
    })
}

pub fn issue_updated_response(identifier: &str) -> Value {
    json!({
        "data": {
            "issueUpdate": {
                "success": true,
                "issue": {
                    "id": format!("id-{identifier}"),
                    "identifier": identifier,
                    "title": format!("Issue {identifier}"),
                    "url": format!("https://linear.app/acme/issue/{identifier}")
                }
            }
        }
    })
}

pub fn comment_created_response() -> Value {
    json!({ "data": { "commentCreate": { "success": true } } })
}

pub fn single_project_response(id: &str, name: &str) -> Value {
    json!({
        "data": {
            "projects": {
                "nodes": [
                    {
                        "id": id,
                        "name": name,
                        "url": format!("https://linear.app/acme/project/{id}"),
                        "status": { "id": "ps-started", "name": "In Progress", "type": "started" }
                    }
                ]
            }
        }
    })
}

pub fn single_initiative_response(id: &str, name: &str) -> Value {
    json!({
        "data": {
            "initiatives": {
                "nodes": [
                    {
                        "id": id,
                        "name": name,
                        "status": "Active",
                        "url": format!("https://linear.app/acme/initiative/{id}")
                    }
                ]
            }
        }
    })
}

/// Project issues as (identifier, title, state name, state type)
pub fn project_issues_response(issues: &[(&str, &str, &str, &str)]) -> Value {
    project_issues_page(issues, None)
}

/// One page of project issues; `next` is the cursor of the following page
pub fn project_issues_page(issues: &[(&str, &str, &str, &str)], next: Option<&str>) -> Value {
    let nodes: Vec<Value> = issues
        .iter()
        .map(|(identifier, title, state, state_type)| {
            json!({
                "id": format!("id-{identifier}"),
                "identifier": identifier,
                "title": title,
                "state": { "id": format!("s-{state_type}"), "name": state, "type": state_type }
            })
        })
        .collect();
    json!({
        "data": {
            "project": {
                "issues": {
                    "nodes": nodes,
                    "pageInfo": { "hasNextPage": next.is_some(), "endCursor": next }
                }
            }
        }
    })
}

pub fn project_statuses_response() -> Value {
    json!({
        "data": {
            "projectStatuses": {
                "nodes": [
                    { "id": "ps-backlog", "name": "Backlog", "type": "backlog" },
                    { "id": "ps-started", "name": "In Progress", "type": "started" },
                    { "id": "ps-completed", "name": "Completed", "type": "completed" }
                ]
            }
        }
    })
}

pub fn project_status_updated_response(id: &str, name: &str) -> Value {
    json!({
        "data": {
            "projectUpdate": {
                "success": true,
                "project": {
                    "id": id,
                    "name": name,
                    "url": null,
                    "status": { "id": "ps-completed", "name": "Completed", "type": "completed" }
                }
            }
        }
    })
}

pub fn project_update_created_response() -> Value {
    json!({
        "data": {
            "projectUpdateCreate": {
                "success": true,
                "projectUpdate": {
                    "id": "update-1",
                    "url": "https://linear.app/acme/project/update-1",
                    "health": "onTrack"
                }
            }
        }
    })
}

pub fn graphql_error_response(message: &str) -> Value {
    json!({ "data": null, "errors": [{ "message": message }] })
}

/// Whether any captured output line contains `needle`
pub fn printed(out: &CliOutput, needle: &str) -> bool {
    out.captured().iter().any(|line| line.contains(needle))
}

// ABOUTME: Phase completion tests: the incomplete-issue guard, dry runs, and partial failures
// ABOUTME: A dry run must compute the same plan a real run executes without issuing mutations

mod common;

use common::*;
use linear_ops::cli::Commands;
use linear_ops::cli_output::CliOutput;
use linear_ops::commands::dispatch;
use linear_ops::error::CliError;
use linear_ops::exit_codes;
use mockito::{Matcher, ServerGuard};
use serde_json::json;

const RESOLVED: &[(&str, &str, &str, &str)] = &[
    ("ENG-1", "Ship API", "Done", "completed"),
    ("ENG-2", "Write docs", "Done", "completed"),
    ("ENG-3", "Old idea", "Canceled", "canceled"),
];

const WITH_INCOMPLETE: &[(&str, &str, &str, &str)] = &[
    ("ENG-1", "Ship API", "Done", "completed"),
    ("ENG-4", "Write runbook", "In Progress", "started"),
];

async fn mock_reads(server: &mut ServerGuard, issues: &[(&str, &str, &str, &str)]) {
    mock_operation(
        server,
        "FindProjects",
        single_project_response("project-phase-1", "Phase 1"),
        1,
    )
    .await;
    mock_operation(server, "ProjectIssues", project_issues_response(issues), 1).await;
}

fn phase_complete(archive: bool, force: bool, dry_run: bool) -> Commands {
    Commands::PhaseComplete {
        project: "Phase 1".to_string(),
        archive,
        force,
        dry_run,
    }
}

#[tokio::test]
async fn test_incomplete_issues_block_completion() {
    let mut server = mock_linear_server().await;
    mock_reads(&mut server, WITH_INCOMPLETE).await;
    let status = mock_operation(
        &mut server,
        "UpdateProjectStatus",
        project_status_updated_response("project-phase-1", "Phase 1"),
        0,
    )
    .await;
    let update =
        mock_operation(&mut server, "CreateProjectUpdate", project_update_created_response(), 0)
            .await;

    let config = test_config(&server);
    let out = CliOutput::capturing();
    let ctx = test_context(&config, &out);

    let err = dispatch(&ctx, phase_complete(false, false, false))
        .await
        .unwrap_err();

    status.assert_async().await;
    update.assert_async().await;
    assert_eq!(err.exit_code(), exit_codes::VALIDATION);
    match err {
        CliError::Validation { message, items, .. } => {
            assert_eq!(message, "Project \"Phase 1\" has 1 incomplete issues");
            assert_eq!(items, vec!["ENG-4 Write runbook (In Progress)".to_string()]);
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_incomplete_issue_on_a_later_page_blocks_completion() {
    let mut server = mock_linear_server().await;
    mock_operation(
        &mut server,
        "FindProjects",
        single_project_response("project-phase-1", "Phase 1"),
        1,
    )
    .await;
    let completed: Vec<String> = (1..=250).map(|n| format!("ENG-{n}")).collect();
    let first_page: Vec<(&str, &str, &str, &str)> = completed
        .iter()
        .map(|id| (id.as_str(), "Ship", "Done", "completed"))
        .collect();
    let first = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "ProjectIssues",
            "variables": { "projectId": "project-phase-1", "after": null }
        })))
        .with_status(200)
        .with_body(project_issues_page(&first_page, Some("cursor-250")).to_string())
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "ProjectIssues",
            "variables": { "projectId": "project-phase-1", "after": "cursor-250" }
        })))
        .with_status(200)
        .with_body(
            project_issues_page(&[("ENG-251", "Fix flaky test", "Todo", "unstarted")], None)
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let status = mock_operation(
        &mut server,
        "UpdateProjectStatus",
        project_status_updated_response("project-phase-1", "Phase 1"),
        0,
    )
    .await;

    let config = test_config(&server);
    let out = CliOutput::capturing();
    let ctx = test_context(&config, &out);

    let err = dispatch(&ctx, phase_complete(false, false, false))
        .await
        .unwrap_err();

    first.assert_async().await;
    second.assert_async().await;
    status.assert_async().await;
    match err {
        CliError::Validation { message, items, .. } => {
            assert_eq!(message, "Project \"Phase 1\" has 1 incomplete issues");
            assert_eq!(items, vec!["ENG-251 Fix flaky test (Todo)".to_string()]);
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_force_completes_and_lists_unresolved() {
    let mut server = mock_linear_server().await;
    mock_reads(&mut server, WITH_INCOMPLETE).await;
    mock_operation(&mut server, "ProjectStatuses", project_statuses_response(), 1).await;
    let status = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "UpdateProjectStatus",
            "variables": { "id": "project-phase-1", "statusId": "ps-completed" }
        })))
        .with_status(200)
        .with_body(project_status_updated_response("project-phase-1", "Phase 1").to_string())
        .create_async()
        .await;
    let update = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex(
            "Closed with unresolved issues".to_string(),
        ))
        .with_status(200)
        .with_body(project_update_created_response().to_string())
        .create_async()
        .await;

    let config = test_config(&server);
    let out = CliOutput::capturing();
    let ctx = test_context(&config, &out);

    let outcome = dispatch(&ctx, phase_complete(false, true, false))
        .await
        .unwrap();

    status.assert_async().await;
    update.assert_async().await;
    assert_eq!(outcome.exit_code, exit_codes::SUCCESS);
    assert_eq!(outcome.result["plan"]["forced"], json!(["ENG-4"]));
    assert_eq!(outcome.result["summaryPosted"], true);
    assert_eq!(outcome.result["archived"], false);
}

#[tokio::test]
async fn test_dry_run_plan_matches_real_run() {
    let mut dry_server = mock_linear_server().await;
    mock_reads(&mut dry_server, RESOLVED).await;
    mock_operation(&mut dry_server, "ProjectStatuses", project_statuses_response(), 1).await;
    let mutations = [
        mock_operation(
            &mut dry_server,
            "UpdateProjectStatus",
            project_status_updated_response("project-phase-1", "Phase 1"),
            0,
        )
        .await,
        mock_operation(
            &mut dry_server,
            "CreateProjectUpdate",
            project_update_created_response(),
            0,
        )
        .await,
        mock_operation(
            &mut dry_server,
            "ArchiveProject",
            json!({ "data": { "projectArchive": { "success": true } } }),
            0,
        )
        .await,
    ];

    let config = test_config(&dry_server);
    let out = CliOutput::capturing();
    let ctx = test_context(&config, &out);
    let dry = dispatch(&ctx, phase_complete(true, false, true))
        .await
        .unwrap();

    for mock in &mutations {
        mock.assert_async().await;
    }
    assert_eq!(dry.result["dryRun"], true);
    assert!(printed(&out, "[DRY RUN] No changes made"));
    assert!(printed(&out, "3. Archive project \"Phase 1\""));

    let mut real_server = mock_linear_server().await;
    mock_reads(&mut real_server, RESOLVED).await;
    mock_operation(&mut real_server, "ProjectStatuses", project_statuses_response(), 1).await;
    mock_operation(
        &mut real_server,
        "UpdateProjectStatus",
        project_status_updated_response("project-phase-1", "Phase 1"),
        1,
    )
    .await;
    mock_operation(
        &mut real_server,
        "CreateProjectUpdate",
        project_update_created_response(),
        1,
    )
    .await;
    mock_operation(
        &mut real_server,
        "ArchiveProject",
        json!({ "data": { "projectArchive": { "success": true } } }),
        1,
    )
    .await;

    let config = test_config(&real_server);
    let out = CliOutput::capturing();
    let ctx = test_context(&config, &out);
    let real = dispatch(&ctx, phase_complete(true, false, false))
        .await
        .unwrap();

    assert_eq!(real.exit_code, exit_codes::SUCCESS);
    assert_eq!(real.result["archived"], true);
    assert_eq!(dry.result["plan"], real.result["plan"]);
}

#[tokio::test]
async fn test_summary_failure_keeps_status_and_exits_upstream() {
    let mut server = mock_linear_server().await;
    mock_reads(&mut server, RESOLVED).await;
    mock_operation(&mut server, "ProjectStatuses", project_statuses_response(), 1).await;
    mock_operation(
        &mut server,
        "UpdateProjectStatus",
        project_status_updated_response("project-phase-1", "Phase 1"),
        1,
    )
    .await;
    mock_operation(
        &mut server,
        "CreateProjectUpdate",
        graphql_error_response("Body is invalid"),
        1,
    )
    .await;

    let config = test_config(&server);
    let out = CliOutput::capturing();
    let ctx = test_context(&config, &out);

    let outcome = dispatch(&ctx, phase_complete(false, false, false))
        .await
        .unwrap();

    assert_eq!(outcome.exit_code, exit_codes::UPSTREAM);
    assert_eq!(outcome.result["statusUpdated"], true);
    assert_eq!(outcome.result["summaryPosted"], false);
    assert!(printed(&out, "the summary update failed"));
}

#[tokio::test]
async fn test_archive_failure_only_warns() {
    let mut server = mock_linear_server().await;
    mock_reads(&mut server, RESOLVED).await;
    mock_operation(&mut server, "ProjectStatuses", project_statuses_response(), 1).await;
    mock_operation(
        &mut server,
        "UpdateProjectStatus",
        project_status_updated_response("project-phase-1", "Phase 1"),
        1,
    )
    .await;
    mock_operation(&mut server, "CreateProjectUpdate", project_update_created_response(), 1).await;
    mock_operation(
        &mut server,
        "ArchiveProject",
        json!({ "data": { "projectArchive": { "success": false } } }),
        1,
    )
    .await;

    let config = test_config(&server);
    let out = CliOutput::capturing();
    let ctx = test_context(&config, &out);

    let outcome = dispatch(&ctx, phase_complete(true, false, false))
        .await
        .unwrap();

    assert_eq!(outcome.exit_code, exit_codes::SUCCESS);
    assert_eq!(outcome.result["archived"], false);
    assert!(printed(&out, "Archive failed"));
}

#[tokio::test]
async fn test_missing_completed_status_is_not_found() {
    let mut server = mock_linear_server().await;
    mock_reads(&mut server, RESOLVED).await;
    mock_operation(
        &mut server,
        "ProjectStatuses",
        json!({
            "data": {
                "projectStatuses": {
                    "nodes": [{ "id": "ps-started", "name": "In Progress", "type": "started" }]
                }
            }
        }),
        1,
    )
    .await;

    let config = test_config(&server);
    let out = CliOutput::capturing();
    let ctx = test_context(&config, &out);

    let err = dispatch(&ctx, phase_complete(false, false, false))
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
}

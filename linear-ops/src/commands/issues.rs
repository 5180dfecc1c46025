// ABOUTME: Issue creation and hierarchy commands: create-issue, create-sub-issue, set-parent, list-sub-issues
// ABOUTME: Labels are checked against the taxonomy, then resolved to the team's label ids

use linear_sdk::{EntityKind, Issue, IssueCreateInput, IssueUpdateInput, LinearError, TeamLabel};
use serde_json::json;

use super::{Context, Outcome};
use crate::error::CliError;
use crate::exit_codes;
use crate::output::TableFormatter;
use crate::taxonomy;
use crate::types::{BatchSummary, ItemResult, ItemStatus, Transition};

#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    pub title: String,
    pub team: Option<String>,
    pub description: Option<String>,
    pub project: Option<String>,
    pub labels: Vec<String>,
    pub priority: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSubIssue {
    pub parent: String,
    pub title: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
    pub priority: Option<u8>,
}

fn require_title(title: &str) -> Result<(), CliError> {
    if title.trim().is_empty() {
        return Err(CliError::InvalidArgs(
            "Issue title must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Print taxonomy findings for labels about to be applied. Never fails.
pub(super) fn report_taxonomy(ctx: &Context<'_>, labels: &[String]) {
    if labels.is_empty() {
        return;
    }
    let report = taxonomy::validate(labels);
    for unknown in &report.unknown {
        ctx.out
            .warning(&format!("\"{unknown}\" is not in the label taxonomy"));
    }
    for warning in &report.warnings {
        ctx.out.warning(warning);
    }
}

/// Map label names to the team's label ids, failing on the first miss
pub(super) fn match_labels(
    team_labels: &[TeamLabel],
    wanted: &[String],
) -> Result<Vec<String>, CliError> {
    wanted
        .iter()
        .map(|name| {
            team_labels
                .iter()
                .find(|l| l.name.eq_ignore_ascii_case(name.trim()))
                .map(|l| l.id.clone())
                .ok_or_else(|| CliError::not_found(EntityKind::Label, name.trim()))
        })
        .collect()
}

async fn label_ids(
    ctx: &Context<'_>,
    team_id: &str,
    labels: &[String],
) -> Result<Option<Vec<String>>, CliError> {
    if labels.is_empty() {
        return Ok(None);
    }
    report_taxonomy(ctx, labels);
    let team_labels = ctx.client.team_labels(team_id).await?;
    Ok(Some(match_labels(&team_labels, labels)?))
}

pub async fn create_issue(ctx: &Context<'_>, request: NewIssue) -> Result<Outcome, CliError> {
    require_title(&request.title)?;

    let team = ctx.team(request.team.as_deref()).await?;
    let project = match request.project.as_deref() {
        Some(search) => Some(ctx.project(search).await?),
        None => None,
    };
    let label_ids = label_ids(ctx, &team.id, &request.labels).await?;

    let input = IssueCreateInput {
        team_id: team.id.clone(),
        title: request.title,
        description: request.description,
        parent_id: None,
        project_id: project.as_ref().map(|p| p.id.clone()),
        label_ids,
        priority: request.priority,
    };

    let issue = ctx.client.create_issue(&input).await?;
    ctx.out
        .success(&format!("Created {}: {}", issue.identifier, issue.title));
    if let Some(url) = &issue.url {
        ctx.out.line(url);
    }

    Ok(Outcome::success(json!({
        "issue": issue,
        "team": team.key,
        "project": project.map(|p| p.name),
    })))
}

pub async fn create_sub_issue(ctx: &Context<'_>, request: NewSubIssue) -> Result<Outcome, CliError> {
    require_title(&request.title)?;

    let parent = ctx.issue(&request.parent).await?;
    let label_ids = label_ids(ctx, &parent.team.id, &request.labels).await?;

    let input = IssueCreateInput {
        team_id: parent.team.id.clone(),
        title: request.title,
        description: request.description,
        parent_id: Some(parent.id.clone()),
        project_id: None,
        label_ids,
        priority: request.priority,
    };

    let issue = ctx.client.create_issue(&input).await?;
    ctx.out.success(&format!(
        "Created {} under {}: {}",
        issue.identifier, parent.identifier, issue.title
    ));

    Ok(Outcome::success(json!({
        "issue": issue,
        "parent": parent.identifier,
    })))
}

async fn reparent(ctx: &Context<'_>, parent: &Issue, raw: &str) -> Result<ItemResult, CliError> {
    let child = match ctx.issue(raw).await {
        Ok(child) => child,
        Err(err @ CliError::NotFound { .. }) => {
            ctx.out.tagged("NOT FOUND", &err.to_string());
            return Ok(ItemResult::failed(raw, ItemStatus::NotFound, err.to_string()));
        }
        Err(CliError::Upstream(LinearError::Auth)) => {
            return Err(CliError::Upstream(LinearError::Auth));
        }
        Err(err) => {
            ctx.out.tagged("FAILED", &format!("{raw}: {err}"));
            return Ok(ItemResult::failed(raw, ItemStatus::Failed, err.to_string()));
        }
    };

    if child.id == parent.id {
        let message = "an issue cannot be its own parent".to_string();
        ctx.out
            .tagged("FAILED", &format!("{}: {message}", child.identifier));
        return Ok(ItemResult::failed(child.identifier, ItemStatus::Failed, message));
    }

    let transition = Transition {
        identifier: child.identifier.clone(),
        from: child
            .parent
            .as_ref()
            .map(|p| p.identifier.clone())
            .unwrap_or_else(|| "(no parent)".to_string()),
        to: parent.identifier.clone(),
    };

    let input = IssueUpdateInput {
        parent_id: Some(parent.id.clone()),
        ..Default::default()
    };
    if let Err(err) = ctx.client.update_issue(&child.id, &input).await {
        ctx.out.tagged("FAILED", &format!("{transition}: {err}"));
        return Ok(ItemResult::failed(child.identifier, ItemStatus::Failed, err.to_string()));
    }

    ctx.out.tagged("UPDATED", &transition.to_string());
    Ok(ItemResult {
        identifier: child.identifier,
        status: ItemStatus::Updated,
        transition: Some(transition),
        error: None,
    })
}

pub async fn set_parent(
    ctx: &Context<'_>,
    parent: &str,
    children: &[String],
) -> Result<Outcome, CliError> {
    if children.is_empty() {
        return Err(CliError::InvalidArgs(
            "At least one child issue is required".to_string(),
        ));
    }
    let parent = ctx.issue(parent).await?;

    let mut results = Vec::with_capacity(children.len());
    for raw in children {
        results.push(reparent(ctx, &parent, raw).await?);
    }

    let summary = BatchSummary::from_results(&results, false);
    ctx.out.line(&summary.to_string());

    let exit_code = if summary.failed == 0 {
        exit_codes::SUCCESS
    } else {
        exit_codes::GENERAL
    };
    Ok(Outcome::with_code(
        json!({
            "parent": parent.identifier,
            "updated": summary.updated,
            "failed": summary.failed,
            "results": results,
        }),
        exit_code,
    ))
}

pub async fn list_sub_issues(ctx: &Context<'_>, parent: &str) -> Result<Outcome, CliError> {
    let parent = ctx.issue(parent).await?;
    let children = ctx.client.issue_children(&parent.id).await?;

    if children.is_empty() {
        ctx.out
            .line(&format!("{} has no sub-issues", parent.identifier));
    } else {
        ctx.out.line(&format!(
            "{} sub-issues of {}: {}",
            children.len(),
            parent.identifier,
            parent.title
        ));
        let table = TableFormatter::new(ctx.out.use_color()).format_issues(&children);
        ctx.out.block(&table);
    }

    Ok(Outcome::success(json!({
        "parent": parent.identifier,
        "children": children,
    })))
}

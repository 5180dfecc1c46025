// ABOUTME: Batch workflow-state changes behind status, done, wip, and sync
// ABOUTME: Each issue is resolved and patched independently; failures are counted, not fatal

use linear_sdk::{Issue, IssueUpdateInput, LinearError, WorkflowState};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

use super::{Context, Outcome};
use crate::error::CliError;
use crate::exit_codes;
use crate::types::{BatchSummary, ItemResult, ItemStatus, Transition, match_state};

#[derive(Debug, Default, Clone)]
pub struct BatchOptions<'a> {
    /// Comment posted on every updated issue
    pub comment: Option<&'a str>,
    pub dry_run: bool,
    /// Pause between consecutive mutations
    pub delay: Option<Duration>,
}

struct Batch<'c, 'a> {
    ctx: &'c Context<'a>,
    target: &'c str,
    options: &'c BatchOptions<'c>,
    states_by_team: HashMap<String, Vec<WorkflowState>>,
    mutated: bool,
}

/// Move every listed issue to the `target` workflow state.
///
/// Exit code is `GENERAL` when any issue failed. Authentication failures
/// abort the whole batch since every later issue would fail the same way.
pub async fn apply_state(
    ctx: &Context<'_>,
    target: &str,
    identifiers: &[String],
    options: &BatchOptions<'_>,
) -> Result<Outcome, CliError> {
    let target = target.trim();
    if target.is_empty() {
        return Err(CliError::InvalidArgs(
            "Target state must not be empty".to_string(),
        ));
    }
    if identifiers.is_empty() {
        return Err(CliError::InvalidArgs(
            "At least one issue identifier is required".to_string(),
        ));
    }

    let mut batch = Batch {
        ctx,
        target,
        options,
        states_by_team: HashMap::new(),
        mutated: false,
    };

    let mut results = Vec::with_capacity(identifiers.len());
    for raw in identifiers {
        results.push(batch.apply_one(raw).await?);
    }

    let summary = BatchSummary::from_results(&results, options.dry_run);
    ctx.out.line(&summary.to_string());

    let exit_code = if summary.failed == 0 {
        exit_codes::SUCCESS
    } else {
        exit_codes::GENERAL
    };

    Ok(Outcome::with_code(
        json!({
            "targetState": target,
            "dryRun": options.dry_run,
            "updated": summary.updated,
            "failed": summary.failed,
            "results": results,
        }),
        exit_code,
    ))
}

fn fatal(err: &LinearError) -> bool {
    matches!(err, LinearError::Auth)
}

impl Batch<'_, '_> {
    async fn apply_one(&mut self, raw: &str) -> Result<ItemResult, CliError> {
        let out = self.ctx.out;

        let identifier = match self.ctx.parse_issue(raw) {
            Ok(identifier) => identifier,
            Err(err) => {
                out.tagged("FAILED", &format!("{raw}: {err}"));
                return Ok(ItemResult::failed(raw, ItemStatus::Failed, err.to_string()));
            }
        };

        let issue = match self.ctx.client.find_issue(&identifier).await {
            Ok(Some(issue)) => issue,
            Ok(None) => {
                out.tagged(
                    "NOT FOUND",
                    &format!("Issue #{} ({identifier})", identifier.number),
                );
                return Ok(ItemResult::failed(
                    identifier.to_string(),
                    ItemStatus::NotFound,
                    "issue not found".to_string(),
                ));
            }
            Err(err) if fatal(&err) => return Err(err.into()),
            Err(err) => {
                out.tagged("FAILED", &format!("{identifier}: {err}"));
                return Ok(ItemResult::failed(
                    identifier.to_string(),
                    ItemStatus::Failed,
                    err.to_string(),
                ));
            }
        };

        let state = match self.target_state(&issue).await {
            Ok(Some(state)) => state,
            Ok(None) => {
                let message = format!(
                    "no workflow state matching \"{}\" in team {}",
                    self.target, issue.team.key
                );
                out.tagged("NO STATE", &format!("{}: {message}", issue.identifier));
                return Ok(ItemResult::failed(
                    issue.identifier,
                    ItemStatus::Failed,
                    message,
                ));
            }
            Err(err) if fatal(&err) => return Err(err.into()),
            Err(err) => {
                out.tagged("FAILED", &format!("{}: {err}", issue.identifier));
                return Ok(ItemResult::failed(
                    issue.identifier,
                    ItemStatus::Failed,
                    err.to_string(),
                ));
            }
        };

        let transition = Transition {
            identifier: issue.identifier.clone(),
            from: issue.state.name.clone(),
            to: state.name.clone(),
        };

        if self.options.dry_run {
            out.tagged("DRY RUN", &transition.to_string());
            return Ok(ItemResult {
                identifier: issue.identifier,
                status: ItemStatus::Planned,
                transition: Some(transition),
                error: None,
            });
        }

        if self.mutated {
            if let Some(delay) = self.options.delay {
                tokio::time::sleep(delay).await;
            }
        }
        self.mutated = true;

        let input = IssueUpdateInput {
            state_id: Some(state.id.clone()),
            ..Default::default()
        };
        if let Err(err) = self.ctx.client.update_issue(&issue.id, &input).await {
            if fatal(&err) {
                return Err(err.into());
            }
            out.tagged("FAILED", &format!("{transition}: {err}"));
            return Ok(ItemResult::failed(
                issue.identifier,
                ItemStatus::Failed,
                err.to_string(),
            ));
        }
        out.tagged("UPDATED", &transition.to_string());

        if let Some(comment) = self.options.comment {
            if let Err(err) = self.ctx.client.create_comment(&issue.id, comment).await {
                out.warning(&format!(
                    "{}: state changed but the comment failed: {err}",
                    issue.identifier
                ));
            }
        }

        Ok(ItemResult {
            identifier: issue.identifier,
            status: ItemStatus::Updated,
            transition: Some(transition),
            error: None,
        })
    }

    // Workflow states are fetched once per team within a batch
    async fn target_state(&mut self, issue: &Issue) -> Result<Option<WorkflowState>, LinearError> {
        if !self.states_by_team.contains_key(&issue.team.id) {
            let states = self.ctx.client.team_states(&issue.team.id).await?;
            self.states_by_team.insert(issue.team.id.clone(), states);
        }

        Ok(self
            .states_by_team
            .get(&issue.team.id)
            .and_then(|states| match_state(states, self.target))
            .cloned())
    }
}

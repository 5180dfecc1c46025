// ABOUTME: Label commands: list, validate, suggest, and agents run locally; set patches an issue
// ABOUTME: Local commands never build a client, so they work without an API key

use linear_sdk::{IssueUpdateInput, LinearError};
use serde_json::json;

use super::issues::{match_labels, report_taxonomy};
use super::{Context, Outcome};
use crate::cli::LabelsCommand;
use crate::cli_output::CliOutput;
use crate::error::CliError;
use crate::output::TableFormatter;
use crate::taxonomy::{self, LABELS};

/// Run a taxonomy-only subcommand. Returns `None` for subcommands that
/// need the API.
pub fn run_local(command: &LabelsCommand, out: &CliOutput) -> Result<Option<Outcome>, CliError> {
    let formatter = TableFormatter::new(out.use_color());

    let outcome = match command {
        LabelsCommand::List { category } => {
            let labels: Vec<&taxonomy::LabelDef> = match category {
                Some(category) => taxonomy::by_category(*category).collect(),
                None => LABELS.iter().collect(),
            };
            out.block(&formatter.format_labels(labels.iter().copied()));
            Outcome::success(json!({ "labels": labels }))
        }
        LabelsCommand::Validate { labels } => {
            let report = taxonomy::validate(labels);
            for name in &report.valid {
                out.tagged("VALID", name);
            }
            for name in &report.unknown {
                out.tagged("UNKNOWN", name);
            }
            for warning in &report.warnings {
                out.warning(warning);
            }
            if report.is_clean() {
                out.success("Labels match the taxonomy");
            }
            let result = serde_json::to_value(&report)
                .map_err(|e| CliError::from(LinearError::from(e)))?;
            Outcome::success(result)
        }
        LabelsCommand::Suggest { text } => {
            if text.trim().is_empty() {
                return Err(CliError::InvalidArgs(
                    "Text to suggest labels for must not be empty".to_string(),
                ));
            }
            let suggestions = taxonomy::suggest(text);
            if suggestions.is_empty() {
                out.line("No labels matched; pick a type label manually");
            }
            for s in &suggestions {
                out.line(&format!(
                    "{} ({}): matched {}",
                    s.label,
                    s.category,
                    s.matched.join(", ")
                ));
            }
            Outcome::success(json!({ "suggestions": suggestions }))
        }
        LabelsCommand::Agents { labels } if labels.is_empty() => {
            let matrix = taxonomy::agent_matrix();
            out.block(&formatter.format_agent_matrix(&matrix));
            let rows: Vec<_> = matrix
                .iter()
                .map(|(label, agents)| json!({ "label": label.name, "agents": agents }))
                .collect();
            Outcome::success(json!({ "matrix": rows }))
        }
        LabelsCommand::Agents { labels } => {
            let hints = taxonomy::agents_for(labels);
            if hints.is_empty() {
                out.line("No recommended agents for these labels");
            }
            for hint in &hints {
                out.line(&format!("{} (from {})", hint.agent, hint.labels.join(", ")));
            }
            Outcome::success(json!({ "agents": hints }))
        }
        LabelsCommand::Set { .. } => return Ok(None),
    };

    Ok(Some(outcome))
}

/// Replace an issue's labels with the given set
pub async fn set_labels(
    ctx: &Context<'_>,
    issue: &str,
    labels: &[String],
) -> Result<Outcome, CliError> {
    report_taxonomy(ctx, labels);

    let issue = ctx.issue(issue).await?;
    let team_labels = ctx.client.team_labels(&issue.team.id).await?;
    let label_ids = match_labels(&team_labels, labels)?;

    let previous: Vec<String> = issue.labels.nodes.iter().map(|l| l.name.clone()).collect();
    let input = IssueUpdateInput {
        label_ids: Some(label_ids),
        ..Default::default()
    };
    ctx.client.update_issue(&issue.id, &input).await?;

    ctx.out.tagged(
        "UPDATED",
        &format!(
            "{}: [{}] → [{}]",
            issue.identifier,
            previous.join(", "),
            labels.join(", ")
        ),
    );

    Ok(Outcome::success(json!({
        "issue": issue.identifier,
        "previous": previous,
        "labels": labels,
    })))
}

pub async fn run_remote(ctx: &Context<'_>, command: LabelsCommand) -> Result<Outcome, CliError> {
    match command {
        LabelsCommand::Set { issue, labels } => set_labels(ctx, &issue, &labels).await,
        local => run_local(&local, ctx.out)?.ok_or_else(|| {
            CliError::InvalidArgs("labels subcommand needs the API".to_string())
        }),
    }
}

// ABOUTME: Phase completion: validate a project's issues, mark it completed, post a summary
// ABOUTME: The plan is built once; dry runs print it and real runs execute exactly that plan

use chrono::NaiveDate;
use linear_sdk::projects::status_of_type;
use linear_sdk::{EntityKind, Health, IssueSummary, ProjectStatusType, StateType};
use serde::Serialize;
use serde_json::json;

use super::{Context, Outcome};
use crate::error::CliError;
use crate::exit_codes;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueCounts {
    pub completed: usize,
    pub canceled: usize,
    pub incomplete: usize,
}

impl IssueCounts {
    pub fn total(&self) -> usize {
        self.completed + self.canceled + self.incomplete
    }
}

/// Split issues into resolved counts and the unresolved issues themselves
pub fn partition(issues: &[IssueSummary]) -> (IssueCounts, Vec<&IssueSummary>) {
    let mut counts = IssueCounts::default();
    let mut incomplete = Vec::new();

    for issue in issues {
        match issue.state.state_type {
            StateType::Completed => counts.completed += 1,
            StateType::Canceled => counts.canceled += 1,
            _ => {
                counts.incomplete += 1;
                incomplete.push(issue);
            }
        }
    }

    (counts, incomplete)
}

fn describe(issue: &IssueSummary) -> String {
    format!("{} {} ({})", issue.identifier, issue.title, issue.state.name)
}

/// Markdown body of the completion update
pub fn render_summary(
    project_name: &str,
    counts: &IssueCounts,
    incomplete: &[&IssueSummary],
    date: NaiveDate,
) -> String {
    let mut body = format!(
        "## Phase complete: {project_name}\n\n\
         Completed on {}.\n\n\
         | Outcome | Issues |\n\
         |---|---|\n\
         | Completed | {} |\n\
         | Canceled | {} |\n\
         | Incomplete | {} |\n\
         | **Total** | {} |\n",
        date.format("%Y-%m-%d"),
        counts.completed,
        counts.canceled,
        counts.incomplete,
        counts.total()
    );

    if !incomplete.is_empty() {
        body.push_str("\nClosed with unresolved issues:\n\n");
        for issue in incomplete {
            body.push_str(&format!("- {}\n", describe(issue)));
        }
    }

    body
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasePlan {
    pub project_id: String,
    pub project_name: String,
    pub target_status_id: String,
    pub target_status_name: String,
    pub counts: IssueCounts,
    /// Unresolved issues closed anyway under `--force`
    pub forced: Vec<String>,
    pub summary: String,
    pub archive: bool,
}

impl PhasePlan {
    /// Mutations a real run performs, in order
    pub fn steps(&self) -> Vec<String> {
        let mut steps = vec![
            format!(
                "Set project status of \"{}\" to {}",
                self.project_name, self.target_status_name
            ),
            format!("Post project update with health {}", Health::OnTrack),
        ];
        if self.archive {
            steps.push(format!("Archive project \"{}\"", self.project_name));
        }
        steps
    }
}

/// Resolve and validate; no mutation happens here.
pub async fn plan(
    ctx: &Context<'_>,
    project_search: &str,
    archive: bool,
    force: bool,
    date: NaiveDate,
) -> Result<PhasePlan, CliError> {
    let project = ctx.project(project_search).await?;
    ctx.out
        .status("→", &format!("Checking issues in \"{}\"", project.name));

    let issues = ctx.client.project_issues(&project.id).await?;
    let (counts, incomplete) = partition(&issues);

    ctx.out.line(&format!(
        "{} completed, {} canceled, {} incomplete",
        counts.completed, counts.canceled, counts.incomplete
    ));

    if !incomplete.is_empty() {
        if force {
            ctx.out.warning(&format!(
                "Completing with {} unresolved issues (--force)",
                incomplete.len()
            ));
        } else {
            return Err(CliError::Validation {
                message: format!(
                    "Project \"{}\" has {} incomplete issues",
                    project.name,
                    incomplete.len()
                ),
                items: incomplete.iter().map(|i| describe(i)).collect(),
                hint: Some(
                    "Complete or cancel these issues, or re-run with --force".to_string(),
                ),
            });
        }
    }

    let statuses = ctx.client.project_statuses().await?;
    let target = status_of_type(&statuses, ProjectStatusType::Completed)
        .ok_or_else(|| CliError::not_found(EntityKind::ProjectStatus, "completed"))?;

    let forced = if force {
        incomplete.iter().map(|i| i.identifier.clone()).collect()
    } else {
        Vec::new()
    };

    Ok(PhasePlan {
        summary: render_summary(&project.name, &counts, &incomplete, date),
        project_id: project.id,
        project_name: project.name,
        target_status_id: target.id.clone(),
        target_status_name: target.name.clone(),
        counts,
        forced,
        archive,
    })
}

fn print_plan(ctx: &Context<'_>, plan: &PhasePlan) {
    ctx.out.line("Plan:");
    for (index, step) in plan.steps().iter().enumerate() {
        ctx.out.line(&format!("  {}. {step}", index + 1));
    }
}

/// Execute a validated plan. Status failure is fatal; a failed summary post
/// leaves the status in place and exits `UPSTREAM`; archive is best effort.
pub async fn execute(ctx: &Context<'_>, plan: &PhasePlan) -> Result<Outcome, CliError> {
    let out = ctx.out;

    ctx.client
        .set_project_status(&plan.project_id, &plan.target_status_id)
        .await?;
    out.tagged(
        "UPDATED",
        &format!("{} → {}", plan.project_name, plan.target_status_name),
    );

    let mut exit_code = exit_codes::SUCCESS;
    let update = match ctx
        .client
        .create_project_update(&plan.project_id, &plan.summary, Health::OnTrack)
        .await
    {
        Ok(update) => {
            out.tagged("POSTED", "Completion summary");
            Some(update)
        }
        Err(err) => {
            out.warning(&format!(
                "Project marked {} but the summary update failed: {err}",
                plan.target_status_name
            ));
            out.hint("Re-running is safe; the status change is idempotent");
            exit_code = exit_codes::UPSTREAM;
            None
        }
    };

    let archived = if plan.archive {
        match ctx.client.archive_project(&plan.project_id).await {
            Ok(()) => {
                out.tagged("ARCHIVED", &plan.project_name);
                true
            }
            Err(err) => {
                out.warning(&format!("Archive failed: {err}"));
                false
            }
        }
    } else {
        false
    };

    Ok(Outcome::with_code(
        json!({
            "dryRun": false,
            "plan": plan,
            "statusUpdated": true,
            "summaryPosted": update.is_some(),
            "update": update,
            "archived": archived,
        }),
        exit_code,
    ))
}

pub async fn phase_complete(
    ctx: &Context<'_>,
    project: &str,
    archive: bool,
    force: bool,
    dry_run: bool,
) -> Result<Outcome, CliError> {
    let today = chrono::Local::now().date_naive();
    let plan = plan(ctx, project, archive, force, today).await?;
    print_plan(ctx, &plan);

    if dry_run {
        ctx.out.tagged("DRY RUN", "No changes made");
        return Ok(Outcome::success(json!({
            "dryRun": true,
            "plan": plan,
        })));
    }

    execute(ctx, &plan).await
}

// ABOUTME: Project commands: create-project, project-status, and add-link
// ABOUTME: External links try a project first and fall back to an initiative

use linear_sdk::projects::status_of_type;
use linear_sdk::{EntityKind, ProjectStatus, ProjectStatusType};
use serde_json::json;
use url::Url;

use super::{Context, Outcome};
use crate::error::CliError;
use crate::exit_codes;

pub async fn create_project(
    ctx: &Context<'_>,
    name: &str,
    team: Option<&str>,
    initiative: Option<&str>,
    description: Option<&str>,
) -> Result<Outcome, CliError> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidArgs(
            "Project name must not be empty".to_string(),
        ));
    }

    let team = ctx.team(team).await?;
    // Resolve before creating so a bad initiative leaves nothing behind
    let initiative = match initiative {
        Some(search) => Some(ctx.initiative(search).await?),
        None => None,
    };

    let project = ctx
        .client
        .create_project(name.trim(), &[team.id.clone()], description)
        .await?;
    ctx.out
        .success(&format!("Created project \"{}\" for {}", project.name, team.key));
    if let Some(url) = &project.url {
        ctx.out.line(url);
    }

    let mut exit_code = exit_codes::SUCCESS;
    let link = match &initiative {
        Some(initiative) => match ctx
            .client
            .link_initiative_project(&initiative.id, &project.id)
            .await
        {
            Ok(link) => {
                ctx.out.tagged(
                    "LINKED",
                    &format!("{} → {}", project.name, initiative.name),
                );
                Some(link)
            }
            Err(err) => {
                ctx.out.warning(&format!(
                    "Project \"{}\" ({}) was created but linking it to {} failed: {err}",
                    project.name, project.id, initiative.name
                ));
                ctx.out.hint(&format!(
                    "Run `linear-ops link-initiative \"{}\" \"{}\"` to retry the link",
                    initiative.name, project.name
                ));
                exit_code = exit_codes::UPSTREAM;
                None
            }
        },
        None => None,
    };

    Ok(Outcome::with_code(
        json!({
            "project": project,
            "team": team.key,
            "initiativeLink": link,
        }),
        exit_code,
    ))
}

/// Pick a workspace project status by name, then by lifecycle type
pub fn find_status<'a>(statuses: &'a [ProjectStatus], wanted: &str) -> Option<&'a ProjectStatus> {
    let needle = wanted.trim();
    statuses
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(needle))
        .or_else(|| {
            needle
                .parse::<ProjectStatusType>()
                .ok()
                .and_then(|t| status_of_type(statuses, t))
        })
}

pub async fn project_status(
    ctx: &Context<'_>,
    project: &str,
    status: &str,
) -> Result<Outcome, CliError> {
    if status.trim().is_empty() {
        return Err(CliError::InvalidArgs(format!(
            "Status must not be empty. Valid: {}",
            ProjectStatusType::ALL
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let project = ctx.project(project).await?;
    let statuses = ctx.client.project_statuses().await?;
    let target = find_status(&statuses, status)
        .ok_or_else(|| CliError::not_found(EntityKind::ProjectStatus, status))?;

    let previous = project.status.as_ref().map(|s| s.name.clone());
    let updated = ctx
        .client
        .set_project_status(&project.id, &target.id)
        .await?;

    ctx.out.tagged(
        "UPDATED",
        &format!(
            "{}: {} → {}",
            updated.name,
            previous.as_deref().unwrap_or("(none)"),
            target.name
        ),
    );

    Ok(Outcome::success(json!({
        "project": updated,
        "previousStatus": previous,
    })))
}

/// Accept only absolute http(s) URLs with a host. The trimmed input is
/// sent as typed rather than in normalized form.
fn check_link_url(raw: &str) -> Result<&str, CliError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| CliError::InvalidArgs(format!("Invalid link URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(trimmed),
        _ => Err(CliError::InvalidArgs(format!(
            "Link URL must be an http:// or https:// address, got '{raw}'"
        ))),
    }
}

pub async fn add_link(
    ctx: &Context<'_>,
    target: &str,
    url: &str,
    label: &str,
) -> Result<Outcome, CliError> {
    let url = check_link_url(url)?;
    if label.trim().is_empty() {
        return Err(CliError::InvalidArgs(
            "Link label must not be empty".to_string(),
        ));
    }

    let resolved = ctx
        .client
        .resolve_link_target(target)
        .await?
        .ok_or_else(|| CliError::not_found(EntityKind::LinkTarget, target))?;
    if resolved.is_ambiguous() {
        ctx.out.warning(&format!(
            "{} matches for \"{target}\"; using {} \"{}\"",
            resolved.candidates,
            resolved.entity.kind().to_string().to_lowercase(),
            resolved.entity.name()
        ));
    }
    let target = resolved.into_inner();

    let link = ctx
        .client
        .create_external_link(&target, url, label)
        .await?;
    ctx.out.success(&format!(
        "Added link \"{}\" to {} \"{}\"",
        link.label,
        target.kind().to_string().to_lowercase(),
        target.name()
    ));

    Ok(Outcome::success(json!({
        "target": target,
        "link": link,
    })))
}

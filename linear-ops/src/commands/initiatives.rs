// ABOUTME: Initiative commands: create-initiative, link-initiative, unlink-initiative
// ABOUTME: Linking is idempotent; unlinking a pair that is not linked only warns

use serde_json::json;

use super::{Context, Outcome};
use crate::error::CliError;

pub async fn create_initiative(
    ctx: &Context<'_>,
    name: &str,
    description: Option<&str>,
) -> Result<Outcome, CliError> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidArgs(
            "Initiative name must not be empty".to_string(),
        ));
    }

    let initiative = ctx
        .client
        .create_initiative(name.trim(), description)
        .await?;
    ctx.out
        .success(&format!("Created initiative \"{}\"", initiative.name));
    if let Some(url) = &initiative.url {
        ctx.out.line(url);
    }

    Ok(Outcome::success(json!({ "initiative": initiative })))
}

pub async fn link_initiative(
    ctx: &Context<'_>,
    initiative: &str,
    project: &str,
) -> Result<Outcome, CliError> {
    let initiative = ctx.initiative(initiative).await?;
    let project = ctx.project(project).await?;

    if let Some(existing) = ctx
        .client
        .find_initiative_project_link(&initiative.id, &project.id)
        .await?
    {
        ctx.out.tagged(
            "SKIPPED",
            &format!("{} is already linked to {}", project.name, initiative.name),
        );
        return Ok(Outcome::success(json!({
            "link": existing,
            "created": false,
        })));
    }

    let link = ctx
        .client
        .link_initiative_project(&initiative.id, &project.id)
        .await?;
    ctx.out.tagged(
        "LINKED",
        &format!("{} → {}", project.name, initiative.name),
    );

    Ok(Outcome::success(json!({
        "link": link,
        "created": true,
    })))
}

pub async fn unlink_initiative(
    ctx: &Context<'_>,
    initiative: &str,
    project: &str,
) -> Result<Outcome, CliError> {
    let initiative = ctx.initiative(initiative).await?;
    let project = ctx.project(project).await?;

    let Some(link) = ctx
        .client
        .find_initiative_project_link(&initiative.id, &project.id)
        .await?
    else {
        ctx.out.warning(&format!(
            "{} is not linked to {}; nothing to do",
            project.name, initiative.name
        ));
        return Ok(Outcome::success(json!({
            "initiative": initiative.name,
            "project": project.name,
            "unlinked": false,
        })));
    };

    ctx.client.unlink_initiative_project(&link.id).await?;
    ctx.out.tagged(
        "UNLINKED",
        &format!("{} ✗ {}", project.name, initiative.name),
    );

    Ok(Outcome::success(json!({
        "initiative": initiative.name,
        "project": project.name,
        "unlinked": true,
    })))
}

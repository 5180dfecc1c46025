// ABOUTME: Project and initiative status updates with a health value
// ABOUTME: Arguments are checked before any lookup so bad input never reaches the API

use linear_sdk::Health;
use serde_json::json;

use super::{Context, Outcome};
use crate::error::CliError;

fn parse_args(body: &str, health: &str) -> Result<Health, CliError> {
    if body.trim().is_empty() {
        return Err(CliError::InvalidArgs(
            "Update body must not be empty".to_string(),
        ));
    }
    health.parse::<Health>().map_err(CliError::InvalidArgs)
}

pub async fn project_update(
    ctx: &Context<'_>,
    project: &str,
    body: &str,
    health: &str,
) -> Result<Outcome, CliError> {
    let health = parse_args(body, health)?;
    let project = ctx.project(project).await?;

    let update = ctx
        .client
        .create_project_update(&project.id, body, health)
        .await?;

    ctx.out
        .success(&format!("Posted {health} update to project \"{}\"", project.name));
    if let Some(url) = &update.url {
        ctx.out.line(url);
    }

    Ok(Outcome::success(json!({
        "project": { "id": project.id, "name": project.name },
        "update": update,
    })))
}

pub async fn initiative_update(
    ctx: &Context<'_>,
    initiative: &str,
    body: &str,
    health: &str,
) -> Result<Outcome, CliError> {
    let health = parse_args(body, health)?;
    let initiative = ctx.initiative(initiative).await?;

    let update = ctx
        .client
        .create_initiative_update(&initiative.id, body, health)
        .await?;

    ctx.out.success(&format!(
        "Posted {health} update to initiative \"{}\"",
        initiative.name
    ));
    if let Some(url) = &update.url {
        ctx.out.line(url);
    }

    Ok(Outcome::success(json!({
        "initiative": { "id": initiative.id, "name": initiative.name },
        "update": update,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args("body", "at-risk").unwrap(), Health::AtRisk);
        assert!(matches!(
            parse_args("  ", "onTrack"),
            Err(CliError::InvalidArgs(_))
        ));
        assert!(matches!(
            parse_args("body", "sideways"),
            Err(CliError::InvalidArgs(_))
        ));
    }
}

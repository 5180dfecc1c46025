// ABOUTME: Account commands: whoami and setup
// ABOUTME: Setup verifies the key against the API, lists teams, and shows which config files apply

use serde_json::json;

use super::{Context, Outcome};
use crate::config::Config;
use crate::error::CliError;
use crate::output::TableFormatter;

pub async fn whoami(ctx: &Context<'_>) -> Result<Outcome, CliError> {
    let viewer = ctx.client.viewer().await?;

    ctx.out.line(&format!("{} <{}>", viewer.name, viewer.email));
    if let Some(org) = &viewer.organization {
        ctx.out
            .line(&format!("Workspace: {} ({})", org.name, org.url_key));
    }

    Ok(Outcome::success(json!({ "viewer": viewer })))
}

pub async fn setup(ctx: &Context<'_>) -> Result<Outcome, CliError> {
    ctx.out.success("LINEAR_API_KEY is set");
    ctx.out
        .status("→", &format!("Connecting to {}", ctx.client.endpoint()));

    let viewer = ctx.client.viewer().await?;
    ctx.out.success(&format!(
        "Authenticated as {} <{}>",
        viewer.name, viewer.email
    ));

    let teams = ctx.client.list_teams().await?;
    if teams.is_empty() {
        ctx.out.warning("No teams are visible to this key");
    } else {
        ctx.out.line(&format!("{} teams:", teams.len()));
        ctx.out
            .block(&TableFormatter::new(ctx.out.use_color()).format_teams(&teams));
    }

    let config_files: Vec<String> = Config::get_config_paths()
        .into_iter()
        .filter(|p| p.is_file())
        .map(|p| p.display().to_string())
        .collect();
    if config_files.is_empty() {
        ctx.out.line("No config file found; using defaults");
    } else {
        for path in &config_files {
            ctx.out.line(&format!("Config: {path}"));
        }
    }

    match &ctx.config.default_team {
        Some(key) if !teams.iter().any(|t| t.key.eq_ignore_ascii_case(key)) => {
            ctx.out.warning(&format!(
                "default_team \"{key}\" does not match any team key"
            ));
        }
        Some(key) => ctx.out.line(&format!("Default team: {key}")),
        None => ctx
            .out
            .line("Tip: set default_team in linear-ops.toml to use bare issue numbers"),
    }

    Ok(Outcome::success(json!({
        "viewer": viewer,
        "teams": teams,
        "configFiles": config_files,
        "defaultTeam": ctx.config.default_team,
    })))
}

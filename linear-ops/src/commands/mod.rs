// ABOUTME: Command dispatch and the per-invocation context shared by every executor
// ABOUTME: Builds the client once per run, resolves named entities, and prints the final JSON

pub mod account;
pub mod batch;
pub mod initiatives;
pub mod issues;
pub mod labels;
pub mod phase;
pub mod projects;
pub mod query;
pub mod updates;

use linear_sdk::constants::timeouts::HTTP_REQUEST_TIMEOUT;
use linear_sdk::{
    EntityKind, Initiative, Issue, IssueIdentifier, LinearClient, LinearError, Project, Resolved,
    Team,
};
use secrecy::SecretString;
use serde_json::Value;

use crate::cli::{Cli, Commands};
use crate::cli_output::CliOutput;
use crate::config::{self, Config};
use crate::constants::states;
use crate::error::CliError;
use crate::exit_codes;

/// Result of a command: the final JSON object and the process exit code
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub result: Value,
    pub exit_code: i32,
}

impl Outcome {
    pub fn success(result: Value) -> Self {
        Self {
            result,
            exit_code: exit_codes::SUCCESS,
        }
    }

    pub fn with_code(result: Value, exit_code: i32) -> Self {
        Self { result, exit_code }
    }
}

/// Everything one command execution needs. The client lives exactly as
/// long as the command.
pub struct Context<'a> {
    pub client: LinearClient,
    pub config: &'a Config,
    pub out: &'a CliOutput,
}

impl<'a> Context<'a> {
    pub fn new(client: LinearClient, config: &'a Config, out: &'a CliOutput) -> Self {
        Self {
            client,
            config,
            out,
        }
    }

    fn note_ambiguity<T>(&self, kind: EntityKind, search: &str, resolved: &Resolved<T>, chosen: &str) {
        if resolved.is_ambiguous() {
            log::warn!(
                "{kind} search \"{search}\" matched {} candidates",
                resolved.candidates
            );
            self.out.warning(&format!(
                "{} {} matched \"{}\"; using \"{}\". Use a more specific name to pick another.",
                resolved.candidates,
                kind.to_string().to_lowercase(),
                search,
                chosen
            ));
        }
    }

    pub async fn project(&self, search: &str) -> Result<Project, CliError> {
        let resolved = self
            .client
            .find_project(search)
            .await?
            .ok_or_else(|| CliError::not_found(EntityKind::Project, search))?;
        self.note_ambiguity(EntityKind::Project, search, &resolved, &resolved.entity.name);
        Ok(resolved.into_inner())
    }

    pub async fn initiative(&self, search: &str) -> Result<Initiative, CliError> {
        let resolved = self
            .client
            .find_initiative(search)
            .await?
            .ok_or_else(|| CliError::not_found(EntityKind::Initiative, search))?;
        self.note_ambiguity(EntityKind::Initiative, search, &resolved, &resolved.entity.name);
        Ok(resolved.into_inner())
    }

    /// Resolve `--team`, falling back to `default_team` from config
    pub async fn team(&self, search: Option<&str>) -> Result<Team, CliError> {
        let search = search
            .or(self.config.default_team.as_deref())
            .ok_or_else(|| {
                CliError::InvalidArgs(
                    "--team is required (or set default_team in linear-ops.toml)".to_string(),
                )
            })?;

        let resolved = self
            .client
            .find_team(search)
            .await?
            .ok_or_else(|| CliError::not_found(EntityKind::Team, search))?;
        self.note_ambiguity(EntityKind::Team, search, &resolved, &resolved.entity.key);
        Ok(resolved.into_inner())
    }

    pub fn parse_issue(&self, raw: &str) -> Result<IssueIdentifier, CliError> {
        Ok(IssueIdentifier::parse(
            raw,
            self.config.default_team.as_deref(),
        )?)
    }

    pub async fn issue(&self, raw: &str) -> Result<Issue, CliError> {
        let identifier = self.parse_issue(raw)?;
        self.client
            .find_issue(&identifier)
            .await?
            .ok_or_else(|| CliError::not_found(EntityKind::Issue, identifier.to_string()))
    }
}

/// Build the API client from the environment key and config
pub fn build_client(config: &Config) -> Result<LinearClient, CliError> {
    build_client_with_key(config, config::api_key_from_env()?)
}

pub fn build_client_with_key(config: &Config, key: SecretString) -> Result<LinearClient, CliError> {
    LinearClient::builder()
        .auth_token(key)
        .timeout(config.timeout().unwrap_or(HTTP_REQUEST_TIMEOUT))
        .base_url(config.api_url.clone())
        .build()
        .map_err(CliError::from)
}

/// Parse-independent entry point used by `main`: load config, run the
/// command, print the final JSON, and return the exit code.
pub async fn run(cli: Cli, out: &CliOutput) -> Result<i32, CliError> {
    let config = Config::load()?;
    let pretty = cli.pretty || config.pretty_json.unwrap_or(false);

    let outcome = execute(cli.command, &config, out).await?;

    out.json(&outcome.result, pretty)
        .map_err(|e| CliError::from(LinearError::from(e)))?;
    Ok(outcome.exit_code)
}

/// Run a command with the given config. Local commands never build a client.
pub async fn execute(
    command: Commands,
    config: &Config,
    out: &CliOutput,
) -> Result<Outcome, CliError> {
    if let Commands::Labels { command } = &command {
        if let Some(outcome) = labels::run_local(command, out)? {
            return Ok(outcome);
        }
    }

    let ctx = Context::new(build_client(config)?, config, out);
    dispatch(&ctx, command).await
}

/// Route a parsed command to its executor
pub async fn dispatch(ctx: &Context<'_>, command: Commands) -> Result<Outcome, CliError> {
    match command {
        Commands::Query { query, variables } => {
            query::run(ctx, &query, variables.as_deref()).await
        }
        Commands::Sync {
            issues,
            state,
            comment,
            dry_run,
        } => {
            let options = batch::BatchOptions {
                comment: comment.as_deref(),
                dry_run,
                delay: Some(ctx.config.sync_delay()),
            };
            batch::apply_state(ctx, &state, &issues, &options).await
        }
        Commands::PhaseComplete {
            project,
            archive,
            force,
            dry_run,
        } => phase::phase_complete(ctx, &project, archive, force, dry_run).await,
        Commands::ProjectUpdate {
            project,
            body,
            health,
        } => updates::project_update(ctx, &project, &body, &health).await,
        Commands::InitiativeUpdate {
            initiative,
            body,
            health,
        } => updates::initiative_update(ctx, &initiative, &body, &health).await,
        Commands::CreateIssue {
            title,
            team,
            description,
            project,
            labels,
            priority,
        } => {
            let request = issues::NewIssue {
                title,
                team,
                description,
                project,
                labels,
                priority,
            };
            issues::create_issue(ctx, request).await
        }
        Commands::CreateSubIssue {
            parent,
            title,
            description,
            labels,
            priority,
        } => {
            let request = issues::NewSubIssue {
                parent,
                title,
                description,
                labels,
                priority,
            };
            issues::create_sub_issue(ctx, request).await
        }
        Commands::SetParent { parent, children } => {
            issues::set_parent(ctx, &parent, &children).await
        }
        Commands::ListSubIssues { parent } => issues::list_sub_issues(ctx, &parent).await,
        Commands::CreateInitiative { name, description } => {
            initiatives::create_initiative(ctx, &name, description.as_deref()).await
        }
        Commands::CreateProject {
            name,
            team,
            initiative,
            description,
        } => {
            projects::create_project(
                ctx,
                &name,
                team.as_deref(),
                initiative.as_deref(),
                description.as_deref(),
            )
            .await
        }
        Commands::ProjectStatus { project, status } => {
            projects::project_status(ctx, &project, &status).await
        }
        Commands::LinkInitiative {
            initiative,
            project,
        } => initiatives::link_initiative(ctx, &initiative, &project).await,
        Commands::UnlinkInitiative {
            initiative,
            project,
        } => initiatives::unlink_initiative(ctx, &initiative, &project).await,
        Commands::AddLink { target, url, label } => {
            projects::add_link(ctx, &target, &url, &label).await
        }
        Commands::Status { state, issues } => {
            batch::apply_state(ctx, &state, &issues, &batch::BatchOptions::default()).await
        }
        Commands::Done { issues } => {
            batch::apply_state(ctx, states::DONE, &issues, &batch::BatchOptions::default()).await
        }
        Commands::Wip { issues } => {
            batch::apply_state(
                ctx,
                states::IN_PROGRESS,
                &issues,
                &batch::BatchOptions::default(),
            )
            .await
        }
        Commands::Labels { command } => labels::run_remote(ctx, command).await,
        Commands::Whoami => account::whoami(ctx).await,
        Commands::Setup => account::setup(ctx).await,
    }
}

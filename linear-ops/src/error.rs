// ABOUTME: CLI error taxonomy with exit codes and remediation text
// ABOUTME: Wraps SDK errors and adds configuration, argument, lookup, and validation failures

use linear_sdk::{EntityKind, GraphQLError, LinearError};
use thiserror::Error;

use crate::constants::{env, urls};
use crate::exit_codes;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    InvalidArgs(String),

    #[error("No {} environment variable found", env::API_KEY)]
    MissingApiKey,

    #[error("{key} is malformed: {0}", key = env::API_KEY)]
    MalformedApiKey(String),

    #[error("{kind} not found matching \"{query}\"")]
    NotFound { kind: EntityKind, query: String },

    #[error("{message}")]
    Validation {
        message: String,
        items: Vec<String>,
        hint: Option<String>,
    },

    #[error(transparent)]
    Upstream(LinearError),

    /// Failure of an ad hoc `query`; always exits with the general code
    #[error("Query failed: {0}")]
    Query(LinearError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<LinearError> for CliError {
    fn from(err: LinearError) -> Self {
        match err {
            LinearError::InvalidInput(message) => CliError::InvalidArgs(message),
            LinearError::Configuration(message) => CliError::Config(message),
            other => CliError::Upstream(other),
        }
    }
}

impl CliError {
    pub fn not_found(kind: EntityKind, query: impl Into<String>) -> Self {
        CliError::NotFound {
            kind,
            query: query.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Config(_) => exit_codes::INVALID_ARGS,
            CliError::MissingApiKey | CliError::MalformedApiKey(_) => {
                exit_codes::MISSING_API_KEY
            }
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::Validation { .. } => exit_codes::VALIDATION,
            CliError::Upstream(LinearError::Auth) => exit_codes::MISSING_API_KEY,
            CliError::Upstream(_) => exit_codes::UPSTREAM,
            CliError::Query(_) => exit_codes::GENERAL,
        }
    }

    /// Actionable follow-up shown under the error message
    pub fn remediation(&self) -> Option<String> {
        match self {
            CliError::InvalidArgs(_) => Some("Run `linear-ops help` for usage".to_string()),
            CliError::MissingApiKey | CliError::MalformedApiKey(_) => Some(format!(
                "Please set your Linear API key:\n  export {}=lin_api_xxxxx\n\nGet your API key from: {}",
                env::API_KEY,
                urls::API_KEY_SETTINGS
            )),
            CliError::NotFound { kind, .. } => Some(match kind {
                EntityKind::Issue => {
                    "Check the issue identifier (e.g. ENG-123) and that the team key is right"
                        .to_string()
                }
                EntityKind::WorkflowState => {
                    "State names are per team; use the name shown in the team's workflow settings"
                        .to_string()
                }
                EntityKind::Label => {
                    "Run `linear-ops labels list` to see the approved taxonomy".to_string()
                }
                other => format!(
                    "Try a shorter or broader search string; {} names match case-insensitively",
                    other.to_string().to_lowercase()
                ),
            }),
            CliError::Validation { hint, .. } => hint.clone(),
            CliError::Upstream(err) | CliError::Query(err) => {
                err.help_text().map(str::to_string)
            }
            CliError::Config(_) => Some(
                "Check the TOML syntax of your linear-ops config file".to_string(),
            ),
        }
    }

    /// Raw GraphQL error entries, echoed verbatim for diagnosis
    pub fn graphql_errors(&self) -> Option<&[GraphQLError]> {
        match self {
            CliError::Upstream(LinearError::GraphQL { errors, .. })
            | CliError::Query(LinearError::GraphQL { errors, .. }) => Some(errors),
            _ => None,
        }
    }
}

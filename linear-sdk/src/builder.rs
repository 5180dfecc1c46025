// ABOUTME: Builder pattern implementation for LinearClient configuration
// ABOUTME: Provides type-safe configuration and endpoint URL validation

use crate::LinearClient;
use crate::constants::{client, timeouts, urls};
use crate::error::LinearError;
use secrecy::SecretString;
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<LinearClient, LinearError>))]
pub struct ClientConfig {
    pub auth_token: SecretString,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = None)]
    pub base_url: Option<String>,

    #[builder(default = client::USER_AGENT.to_string())]
    pub user_agent: String,
}

impl From<ClientConfig> for Result<LinearClient, LinearError> {
    fn from(config: ClientConfig) -> Self {
        LinearClient::from_config(config)
    }
}

impl LinearClient {
    pub fn builder() -> ClientConfigBuilder<((), (), (), ())> {
        ClientConfig::builder()
    }
}

/// Resolve the GraphQL endpoint from a base URL. Accepts either the API root
/// (`https://api.linear.app`) or the full endpoint (`.../graphql`).
pub fn graphql_endpoint(base_url: Option<&str>) -> Result<Url, LinearError> {
    let base = base_url.unwrap_or(urls::LINEAR_API_BASE).trim_end_matches('/');

    let endpoint = if base.ends_with(&format!("/{}", urls::GRAPHQL_PATH)) {
        base.to_string()
    } else {
        format!("{}/{}", base, urls::GRAPHQL_PATH)
    };

    let url = Url::parse(&endpoint)
        .map_err(|e| LinearError::Configuration(format!("Invalid API URL '{base}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LinearError::Configuration(format!(
            "Unsupported API URL scheme '{other}'"
        ))),
    }
}

// ABOUTME: Linear SDK library providing a typed GraphQL client for the Linear API
// ABOUTME: Handles authentication, request/response plumbing, and GraphQL error mapping

pub mod builder;
pub mod constants;
pub mod error;
pub mod initiatives;
pub mod issues;
pub mod projects;
pub mod queries;
pub mod resolver;
pub mod teams;
pub mod types;

#[cfg(test)]
mod test_helpers;

use graphql_client::{QueryBody, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

pub use builder::ClientConfig;
pub use error::LinearError;
pub use graphql_client::Error as GraphQLError;
pub use issues::{IssueCreateInput, IssueIdentifier, IssueUpdateInput};
pub use resolver::{EntityKind, LinkTarget, Resolved, pick_best};
pub use types::*;

pub type Result<T> = std::result::Result<T, LinearError>;

/// Client for the Linear GraphQL API. One instance is meant to live for a
/// single command execution.
pub struct LinearClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl LinearClient {
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(config.auth_token.expose_secret()).map_err(|_| {
            LinearError::Configuration("API key contains characters not allowed in a header".into())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| LinearError::Configuration("Invalid user agent".into()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| LinearError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let endpoint = builder::graphql_endpoint(config.base_url.as_deref())?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Execute a named GraphQL document and decode its `data` payload.
    pub async fn execute<V, T>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        log::debug!("Executing GraphQL operation {}", operation_name);

        let body = QueryBody {
            variables,
            query,
            operation_name,
        };

        self.post(&body).await
    }

    /// Execute an arbitrary GraphQL document, returning the raw `data` object.
    pub async fn execute_raw(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value> {
        log::debug!("Executing ad hoc GraphQL document");

        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        self.post(&body).await
    }

    async fn post<B, T>(&self, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        log::trace!("Linear responded with HTTP {}", status);

        match status.as_u16() {
            401 | 403 => return Err(LinearError::Auth),
            429 => return Err(LinearError::RateLimit),
            _ => {}
        }

        let text = response.text().await?;
        let parsed: Response<T> = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(LinearError::Http {
                    status: status.as_u16(),
                    body: text,
                });
            }
            Err(e) => {
                log::debug!("Failed to decode response: {}", e);
                return Err(LinearError::InvalidResponse);
            }
        };

        if let Some(errors) = parsed.errors {
            if !errors.is_empty() {
                return Err(LinearError::from_graphql_errors(errors));
            }
        }

        parsed.data.ok_or(LinearError::InvalidResponse)
    }

    pub async fn viewer(&self) -> Result<Viewer> {
        #[derive(serde::Deserialize)]
        struct Data {
            viewer: Viewer,
        }

        let data: Data = self
            .execute("Viewer", queries::VIEWER, serde_json::json!({}))
            .await?;
        Ok(data.viewer)
    }
}

/// Turn a mutation payload's `success` flag into a result.
pub(crate) fn ensure_success(success: bool, operation: &'static str) -> Result<()> {
    if success {
        Ok(())
    } else {
        Err(LinearError::MutationFailed { operation })
    }
}

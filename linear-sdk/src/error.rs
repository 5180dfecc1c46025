// ABOUTME: Custom error types for Linear SDK with user-friendly messages
// ABOUTME: Maps HTTP, transport, and GraphQL failures onto a small set of variants

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinearError {
    #[error("Authentication failed. Check your LINEAR_API_KEY")]
    Auth,

    #[error("Rate limit exceeded. Please wait before making more requests")]
    RateLimit,

    #[error("Timeout: Request took too long to complete")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("GraphQL error: {message}")]
    GraphQL {
        message: String,
        errors: Vec<graphql_client::Error>,
    },

    #[error("Invalid API response format")]
    InvalidResponse,

    #[error("Linear reported failure for {operation}")]
    MutationFailed { operation: &'static str },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LinearError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            LinearError::Auth => Some("Get your API key from: https://linear.app/settings/api"),
            LinearError::Network(_) => Some("Check your internet connection and try again"),
            LinearError::RateLimit => Some("Wait a moment before making another request"),
            LinearError::Timeout => Some("Try again or check your network connection"),
            LinearError::MutationFailed { .. } => {
                Some("Linear accepted the request but did not apply it; re-run to retry")
            }
            _ => None,
        }
    }

    /// Build a GraphQL error from the response's error array, keeping the
    /// raw entries so callers can echo them verbatim.
    pub fn from_graphql_errors(errors: Vec<graphql_client::Error>) -> Self {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        LinearError::GraphQL { message, errors }
    }
}

impl From<reqwest::Error> for LinearError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LinearError::Timeout
        } else if err.is_status() {
            if let Some(status) = err.status() {
                match status.as_u16() {
                    401 | 403 => LinearError::Auth,
                    429 => LinearError::RateLimit,
                    _ => LinearError::Network(err.to_string()),
                }
            } else {
                LinearError::Network(err.to_string())
            }
        } else {
            LinearError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LinearError {
    fn from(_err: serde_json::Error) -> Self {
        LinearError::InvalidResponse
    }
}

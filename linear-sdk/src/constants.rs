// ABOUTME: Centralized constants for the Linear SDK
// ABOUTME: Contains API URLs, timeouts, and page sizes used by queries

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Linear API URLs
pub mod urls {
    /// Base URL for Linear API GraphQL endpoint
    pub const LINEAR_API_BASE: &str = "https://api.linear.app";

    /// Path of the GraphQL endpoint relative to the base URL
    pub const GRAPHQL_PATH: &str = "graphql";
}

/// Request identity
pub mod client {
    pub const USER_AGENT: &str = concat!("linear-ops/", env!("CARGO_PKG_VERSION"));
}

// ABOUTME: Centralized constants for the linear-ops CLI
// ABOUTME: Contains delays, environment variable names, config paths, and workflow state aliases

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Environment variables read by the CLI
pub mod env {
    /// Sole authentication credential
    pub const API_KEY: &str = "LINEAR_API_KEY";

    /// Optional explicit config file path (highest precedence)
    pub const CONFIG_PATH: &str = "LINEAR_OPS_CONFIG";

    /// Expected prefix of personal API keys
    pub const API_KEY_PREFIX: &str = "lin_api_";
}

/// Timing for bulk operations
pub mod timing {
    use std::time::Duration;

    /// Courtesy pause between consecutive mutations in `sync`
    pub const SYNC_DELAY: Duration = Duration::from_millis(100);
}

/// Config file locations
pub mod config {
    /// Per-project config file in the working directory
    pub const PROJECT_FILE: &str = "linear-ops.toml";

    /// Directory under the user config dir
    pub const APP_DIR: &str = "linear-ops";

    pub const FILE_NAME: &str = "config.toml";
}

/// Links shown in remediation messages
pub mod urls {
    pub const API_KEY_SETTINGS: &str = "https://linear.app/settings/api";
}

/// UI and formatting constants
pub mod ui {
    /// Longest issue title shown in tables before truncation
    pub const MAX_TITLE_LEN: usize = 60;
}

/// Workflow state shorthands accepted by `status`, `done`, `wip`, and `sync`.
/// Values are state *types*; a shorthand matches the first team state of
/// that type when no state carries the literal name.
pub static STATE_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("done", "completed");
    m.insert("completed", "completed");
    m.insert("complete", "completed");
    m.insert("wip", "started");
    m.insert("in-progress", "started");
    m.insert("inprogress", "started");
    m.insert("in_progress", "started");
    m.insert("started", "started");
    m.insert("todo", "unstarted");
    m.insert("unstarted", "unstarted");
    m.insert("backlog", "backlog");
    m.insert("canceled", "canceled");
    m.insert("cancelled", "canceled");
    m.insert("triage", "triage");
    m
});

/// Target state names used by the shorthand commands
pub mod states {
    pub const DONE: &str = "Done";
    pub const IN_PROGRESS: &str = "In Progress";
}

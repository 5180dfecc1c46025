// ABOUTME: Process exit codes shared by every command
// ABOUTME: Lets calling scripts branch on the failure class without parsing text

pub const SUCCESS: i32 = 0;

/// Batch finished with failures, or an ad hoc query failed
pub const GENERAL: i32 = 1;

/// Missing or invalid arguments (clap also exits with 2)
pub const INVALID_ARGS: i32 = 2;

pub const MISSING_API_KEY: i32 = 3;

/// A named entity did not resolve
pub const NOT_FOUND: i32 = 4;

/// A precondition failed, e.g. incomplete issues without `--force`
pub const VALIDATION: i32 = 5;

/// GraphQL errors, HTTP or network failure
pub const UPSTREAM: i32 = 6;

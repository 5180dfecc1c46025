// ABOUTME: Library exports for linear-ops modules for testing and external use
// ABOUTME: Makes the command executors, taxonomy, and output helpers available to integration tests

pub mod cli;
pub mod cli_output;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod exit_codes;
pub mod output;
pub mod taxonomy;
pub mod types;

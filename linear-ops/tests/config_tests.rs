// ABOUTME: Tests for configuration file loading, validation, and hierarchical merging
// ABOUTME: Covers TOML parsing, unknown keys, api_url checks, and path precedence

use linear_ops::config::Config;
use linear_ops::error::CliError;
use linear_ops::exit_codes;
use std::time::Duration;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Should write config file");
    path
}

#[test]
fn test_config_deserialize_complete() {
    let toml_content = r#"
        default_team = "ENG"
        api_url = "https://api.linear.app"
        sync_delay_ms = 250
        timeout_secs = 10
        pretty_json = true
    "#;

    let config: Config = toml::from_str(toml_content).expect("Should parse valid TOML");

    assert_eq!(config.default_team, Some("ENG".to_string()));
    assert_eq!(config.api_url, Some("https://api.linear.app".to_string()));
    assert_eq!(config.sync_delay(), Duration::from_millis(250));
    assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
    assert_eq!(config.pretty_json, Some(true));
}

#[test]
fn test_config_deserialize_empty() {
    let config: Config = toml::from_str("").expect("Should parse empty TOML");
    assert_eq!(config, Config::default());
    assert_eq!(config.sync_delay(), Duration::from_millis(100));
    assert_eq!(config.timeout(), None);
}

#[test]
fn test_unknown_keys_are_rejected() {
    let result: Result<Config, _> = toml::from_str(r#"default_teem = "ENG""#);
    assert!(result.is_err());
}

#[test]
fn test_invalid_api_url_is_rejected() {
    let result: Result<Config, _> = toml::from_str(r#"api_url = "ftp://api.linear.app""#);
    let err = result.unwrap_err().to_string();
    assert!(err.contains("Invalid api_url"), "got: {err}");
}

#[test]
fn test_later_paths_take_precedence() {
    let dir = TempDir::new().expect("Should create temp dir");
    let user = write(
        &dir,
        "user.toml",
        "default_team = \"ENG\"\nsync_delay_ms = 500\n",
    );
    let project = write(&dir, "project.toml", "default_team = \"OPS\"\n");

    let config = Config::load_from_paths(&[user, project]).expect("Should load config");

    assert_eq!(config.default_team, Some("OPS".to_string()));
    assert_eq!(config.sync_delay_ms, Some(500));
}

#[test]
fn test_missing_files_are_skipped() {
    let dir = TempDir::new().expect("Should create temp dir");
    let present = write(&dir, "config.toml", "timeout_secs = 5\n");
    let missing = dir.path().join("nope.toml");

    let config = Config::load_from_paths(&[missing, present]).expect("Should load config");
    assert_eq!(config.timeout_secs, Some(5));
}

#[test]
fn test_invalid_file_is_a_config_error() {
    let dir = TempDir::new().expect("Should create temp dir");
    let broken = write(&dir, "config.toml", "default_team = [\n");

    let err = Config::load_from_paths(&[broken]).unwrap_err();
    let cli_err = CliError::from(err);

    assert!(matches!(cli_err, CliError::Config(_)));
    assert_eq!(cli_err.exit_code(), exit_codes::INVALID_ARGS);
    assert!(cli_err.to_string().contains("config.toml"));
}

#[test]
fn test_zero_timeout_in_file_is_rejected() {
    let dir = TempDir::new().expect("Should create temp dir");
    let path = write(&dir, "config.toml", "timeout_secs = 0\n");

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("timeout_secs must be greater than zero"));
}

#[test]
fn test_standard_paths_end_with_project_file() {
    let paths = Config::get_config_paths();
    assert!(
        paths
            .iter()
            .any(|p| p.file_name().is_some_and(|n| n == "linear-ops.toml"))
    );
}

// ABOUTME: Main entry point for the linear-ops CLI application
// ABOUTME: Parses arguments, sets up logging, runs the command, and maps errors to exit codes

use clap::Parser;
use std::process::ExitCode;

use linear_ops::cli::Cli;
use linear_ops::cli_output::CliOutput;
use linear_ops::commands;
use linear_ops::error::CliError;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn report_error(out: &CliOutput, err: &CliError) {
    out.error(&err.to_string());

    if let CliError::Validation { items, .. } = err {
        for item in items {
            out.hint(&format!("- {item}"));
        }
    }

    if let Some(errors) = err.graphql_errors() {
        match serde_json::to_string_pretty(errors) {
            Ok(raw) => eprintln!("{raw}"),
            Err(e) => log::debug!("Could not render GraphQL errors: {}", e),
        }
    }

    if let Some(remediation) = err.remediation() {
        out.hint("");
        out.hint(&remediation);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let out = CliOutput::new(cli.no_color);
    let code = match commands::run(cli, &out).await {
        Ok(code) => code,
        Err(err) => {
            log::debug!("Command failed: {:?}", err);
            report_error(&out, &err);
            err.exit_code()
        }
    };

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

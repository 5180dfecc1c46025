// ABOUTME: Ad hoc GraphQL passthrough
// ABOUTME: Every failure maps to the general exit code so scripts only need to check zero

use linear_sdk::LinearError;
use serde_json::Value;

use super::{Context, Outcome};
use crate::error::CliError;

fn parse_variables(raw: Option<&str>) -> Result<Value, LinearError> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(Value::Object(Default::default()));
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(LinearError::InvalidInput(
            "Variables must be a JSON object".to_string(),
        )),
        Err(e) => Err(LinearError::InvalidInput(format!(
            "Variables are not valid JSON: {e}"
        ))),
    }
}

pub async fn run(ctx: &Context<'_>, query: &str, variables: Option<&str>) -> Result<Outcome, CliError> {
    if query.trim().is_empty() {
        return Err(CliError::Query(LinearError::InvalidInput(
            "Query must not be empty".to_string(),
        )));
    }
    let variables = parse_variables(variables).map_err(CliError::Query)?;

    let data = ctx
        .client
        .execute_raw(query, variables)
        .await
        .map_err(CliError::Query)?;

    Ok(Outcome::success(data))
}

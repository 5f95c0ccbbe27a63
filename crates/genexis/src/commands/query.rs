//! Raw JSON-RPC query handler.

use serde_json::{Map, Value};

use genexis_api::Session;

use crate::cli::{GlobalOpts, OutputFormat, QueryArgs};
use crate::error::CliError;
use crate::output;

/// Parse `--params` into the object merged after the session token.
fn parse_params(raw: Option<&str>) -> Result<Map<String, Value>, CliError> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };
    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(CliError::Validation {
            field: "params".into(),
            reason: format!("expected a JSON object, got {other}"),
        }),
    }
}

pub async fn handle(
    session: &Session,
    args: QueryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let params = parse_params(args.params.as_deref())?;
    let response = session.invoke(&args.method, params).await?;
    let compact = matches!(global.format(), OutputFormat::JsonCompact | OutputFormat::Plain);
    output::print_output(&output::render_json(&response, compact)?, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn params_must_be_an_object() {
        assert!(parse_params(None).unwrap().is_empty());
        assert_eq!(
            parse_params(Some(r#"{"band":"5GHz"}"#)).unwrap()["band"],
            "5GHz"
        );
        assert!(matches!(
            parse_params(Some("[1, 2]")),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(parse_params(Some("{")), Err(CliError::Json(_))));
    }
}

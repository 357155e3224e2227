//! Raw request handler: any method and path, with the bearer token attached.

use seek_api::Method;

use crate::cli::{GlobalOpts, RequestArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

fn parse_method(raw: &str) -> Result<Method, CliError> {
    Method::from_bytes(raw.to_ascii_uppercase().as_bytes()).map_err(|_| CliError::Validation {
        field: "method".into(),
        reason: format!("'{raw}' is not an HTTP method"),
    })
}

pub async fn handle(ctx: &Context, args: RequestArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let method = parse_method(&args.method)?;
    let body = match (args.data, args.from_file) {
        (Some(raw), _) => Some(serde_json::from_str::<serde_json::Value>(&raw)?),
        (None, Some(path)) => Some(util::read_json_file(&path)?),
        (None, None) => None,
    };

    let resp = ctx.api().request(method, &args.path, body.as_ref()).await?;
    let status = resp.status();
    let text = resp.text().await.map_err(seek_api::Error::from)?;

    // JSON bodies follow --output; anything else passes through.
    let out = match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => output::render_single(
            &global.output,
            &json,
            |j| serde_json::to_string_pretty(j).unwrap_or_else(|_| j.to_string()),
            ToString::to_string,
        )?,
        Err(_) => text,
    };
    output::print_output(&out, global.quiet);

    if status.is_success() {
        Ok(())
    } else {
        Err(CliError::ApiError {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("request failed").to_owned(),
        })
    }
}

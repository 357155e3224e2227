//! Assistant command handlers: error explanation and Kia chat history.

use serde::Serialize;

use seek_api::models::ChatTurn;

use crate::cli::{ExplainErrorArgs, GlobalOpts, KiaArgs, KiaCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

pub async fn handle(
    ctx: &Context,
    args: ExplainErrorArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let snippet = match (args.code, args.file) {
        (Some(code), _) => code,
        (None, Some(path)) => util::read_text(&path)?,
        (None, None) => util::read_text(std::path::Path::new("-"))?,
    };
    if snippet.trim().is_empty() {
        return Err(CliError::Validation {
            field: "code".into(),
            reason: "code snippet cannot be empty".into(),
        });
    }

    let explanation = ctx.api().explain_error(&snippet).await?;
    let out = output::render_single(
        &global.output,
        &explanation,
        |e| e.explanation.clone(),
        |e| e.explanation.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// A saved exchange as shown to the user.
#[derive(Serialize)]
struct SavedTurn {
    user_id: u64,
    message: String,
    query: String,
    response: String,
}

const PREVIEW_CHARS: usize = 60;

fn saved_detail(painter: Painter, t: &SavedTurn) -> String {
    output::detail_lines(
        painter,
        &[
            ("User", t.user_id.to_string()),
            ("Status", painter.ok(&t.message)),
            ("Query", util::truncate(&t.query, PREVIEW_CHARS)),
            ("Response", util::truncate(&t.response, PREVIEW_CHARS)),
        ],
    )
}

pub async fn kia(ctx: &Context, args: KiaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let painter = Painter::new(&global.color);

    match args.command {
        KiaCommand::Save {
            user_id,
            query,
            response,
        } => {
            let turn = ChatTurn {
                user_id,
                query,
                response,
            };
            let saved = ctx.api().save_chat_history(&turn).await?;
            let shown = SavedTurn {
                user_id: saved.user_id,
                message: saved.message,
                query: turn.query,
                response: turn.response,
            };
            let out = output::render_single(
                &global.output,
                &shown,
                |t| saved_detail(painter, t),
                |t| t.user_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

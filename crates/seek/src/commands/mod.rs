//! Command dispatch: bridges CLI args -> API/session calls -> output formatting.

pub mod ai;
pub mod assignments;
pub mod auth;
pub mod config_cmd;
pub mod lectures;
pub mod programming;
pub mod request;
pub mod routes;
pub mod util;
pub mod weeks;

use crate::cli::{Command, GlobalOpts};
use crate::config::Context;
use crate::error::CliError;

/// Dispatch a context-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Routes(args) => routes::handle(ctx, args, global),
        Command::Login(args) => auth::login(ctx, args, global).await,
        Command::GoogleLogin(args) => auth::google_login(ctx, args, global).await,
        Command::Signup(args) => auth::signup(ctx, args, global).await,
        Command::Logout => auth::logout(ctx, global).await,
        Command::Status => auth::status(ctx, global),
        Command::Weeks(args) => weeks::handle(ctx, args, global).await,
        Command::Lectures(args) => lectures::handle(ctx, args, global).await,
        Command::Assignments(args) => assignments::handle(ctx, args, global).await,
        Command::Programming(args) => programming::handle(ctx, args, global).await,
        Command::ExplainError(args) => ai::handle(ctx, args, global).await,
        Command::Kia(args) => ai::kia(ctx, args, global).await,
        Command::Request(args) => request::handle(ctx, args, global).await,
        // Config and Completions are handled before a context exists
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "handled without an API context".into(),
        }),
    }
}

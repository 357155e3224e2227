//! Session command handlers: login, signup, logout, status.

use serde::Serialize;

use seek_api::TokenProvider;
use seek_api::models::{Role, SignupRequest};

use crate::cli::{GlobalOpts, GoogleLoginArgs, LoginArgs, RoleArg, SignupArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

pub async fn login(ctx: &Context, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let email = util::value_or_prompt(args.email, "Email")?;
    let password = util::secret_or_prompt(args.password, "Password")?;

    ctx.session().login(&email, &password).await?;
    output::print_status(
        &format!("Logged in as {email} (token kept in {})", ctx.tokens.kind()),
        global.quiet,
    );
    Ok(())
}

pub async fn google_login(
    ctx: &Context,
    args: GoogleLoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    tracing::debug!(client_id = ctx.shell.google_client_id(), "google identity client");
    let token = util::secret_or_prompt(args.token, "Google access token")?;
    let session = ctx.session();

    if args.signup {
        session.google_signup(&token).await?;
        output::print_status("Signed up and logged in with Google", global.quiet);
    } else {
        session.google_login(&token).await?;
        output::print_status("Logged in with Google", global.quiet);
    }
    Ok(())
}

pub async fn signup(ctx: &Context, args: SignupArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let password = util::secret_or_prompt(args.password, "Password")?;
    let request = SignupRequest {
        username: args.username,
        email: args.email,
        password,
        role: match args.role {
            RoleArg::Student => Role::Student,
            RoleArg::Admin => Role::Admin,
        },
    };

    let resp = ctx.session().signup(&request).await?;
    output::print_status(&resp.message, global.quiet);
    output::print_status("Log in with: seek login", global.quiet);
    Ok(())
}

pub async fn logout(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.session().logout().await?;
    output::print_status("Logged out", global.quiet);
    Ok(())
}

// ── Status ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Status {
    api_url: String,
    token_store: String,
    authenticated: bool,
}

pub fn status(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let painter = Painter::new(&global.color);
    let status = Status {
        api_url: ctx.api().base_url().to_string(),
        token_store: ctx.tokens.kind().to_string(),
        authenticated: ctx.tokens.access_token()?.is_some(),
    };

    let out = output::render_single(
        &global.output,
        &status,
        |s| {
            let auth = if s.authenticated {
                painter.ok("logged in")
            } else {
                painter.warn("not logged in")
            };
            output::detail_lines(
                painter,
                &[
                    ("API", s.api_url.clone()),
                    ("Token store", s.token_store.clone()),
                    ("Session", auth),
                ],
            )
        },
        |s| s.authenticated.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

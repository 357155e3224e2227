//! CLI error types with miette diagnostics.
//!
//! Maps API, core, and config errors into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use seek_api::TokenError;
use seek_config::ConfigError;
use seek_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Seek API at {url}")]
    #[diagnostic(
        code(seek::connection_failed),
        help(
            "Check your network connection and the API URL.\n\
             Override it with --api-url or SEEK_API_URL."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(seek::timeout),
        help("Increase the timeout with --timeout or check the API's responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Not authorized: {message}")]
    #[diagnostic(
        code(seek::unauthorized),
        help("Your session may have expired. Log in again with: seek login")
    )]
    Unauthorized { message: String },

    #[error("Access token storage failed: {message}")]
    #[diagnostic(
        code(seek::token_store),
        help(
            "If the system keyring is unavailable, keep the token in a file instead:\n\
             seek config set token_store file"
        )
    )]
    TokenStore { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Not found: {message}")]
    #[diagnostic(code(seek::not_found))]
    NotFound { message: String },

    #[error("No route named '{name}'")]
    #[diagnostic(
        code(seek::unknown_route),
        help("Known routes: {available}\nRun: seek routes list")
    )]
    UnknownRoute { name: String, available: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(seek::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response from the API: {message}")]
    #[diagnostic(code(seek::bad_response))]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(seek::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(seek::config),
        help("Inspect the file with: seek config show\nOr recreate it with: seek config init")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(seek::json), help("Check the JSON body and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Unauthorized { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::UnknownRoute { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Json(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub(crate) fn prompt(e: impl std::fmt::Display) -> Self {
        Self::Validation {
            field: "interactive".into(),
            reason: format!("prompt failed: {e}"),
        }
    }
}

// ── Upstream error mapping ───────────────────────────────────────────

impl From<seek_api::Error> for CliError {
    fn from(err: seek_api::Error) -> Self {
        use seek_api::Error as E;

        match err {
            E::TokenLookup(e) => e.into(),
            E::InvalidToken => Self::Unauthorized {
                message: "stored access token is malformed".into(),
            },
            E::Unauthorized { message } => Self::Unauthorized { message },
            E::Api {
                status: 404,
                message,
            } => Self::NotFound { message },
            E::Api { status, message } => Self::ApiError { status, message },
            E::Transport(e) if e.is_timeout() => Self::Timeout,
            E::Transport(e) => Self::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: Box::new(e),
            },
            E::InvalidUrl(e) => Self::Validation {
                field: "api_url".into(),
                reason: e.to_string(),
            },
            E::Deserialization { message, .. } => Self::BadResponse { message },
        }
    }
}

impl From<TokenError> for CliError {
    fn from(err: TokenError) -> Self {
        Self::TokenStore {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(e) => e.into(),
            CoreError::TokenStorage(e) => e.into(),
            CoreError::LogoutIncomplete { remote, local } => Self::TokenStore {
                message: format!("{local} (server logout also failed: {remote})"),
            },
            CoreError::UnknownRoute { name } => Self::UnknownRoute {
                name,
                available: String::new(),
            },
            CoreError::MissingParam { route, param } => Self::Validation {
                field: param,
                reason: format!("route '{route}' needs it (pass -p key=value)"),
            },
            other => Self::Validation {
                field: "route table".into(),
                reason: other.to_string(),
            },
        }
    }
}

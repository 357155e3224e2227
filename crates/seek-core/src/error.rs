// ── Core error types ──
//
// Route table construction and lookup errors, plus wrapped API and
// token storage failures from the session flows.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Route table ──────────────────────────────────────────────────
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Duplicate route path: {path}")]
    DuplicatePath { path: String },

    #[error("Duplicate route name: {name}")]
    DuplicateName { name: String },

    #[error("Unknown route: {name}")]
    UnknownRoute { name: String },

    #[error("Route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },

    // ── Session ──────────────────────────────────────────────────────
    #[error(transparent)]
    Api(#[from] seek_api::Error),

    #[error(transparent)]
    TokenStorage(#[from] seek_api::TokenError),

    /// Both halves of logout failed: the back end call and the local clear.
    #[error("Logout failed on the server ({remote}) and the local token could not be cleared")]
    LogoutIncomplete {
        remote: seek_api::Error,
        #[source]
        local: seek_api::TokenError,
    },
}

impl CoreError {
    /// Returns `true` if the API rejected the stored credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}

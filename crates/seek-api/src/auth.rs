// Token access for the bearer interceptor.
//
// The client only ever *reads* the token through `TokenProvider`.
// Login/logout flows own writes and go through `TokenStore`.

use std::sync::RwLock;

use secrecy::SecretString;
use thiserror::Error;

/// Key under which the access token is persisted in durable storage.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Failure reading or writing the durable token storage.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The storage backend could not be reached (locked keyring, poisoned lock, ...).
    #[error("token storage unavailable: {0}")]
    Unavailable(String),

    /// Filesystem-backed storage failed.
    #[error("token storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only capability returning the current bearer token, if any.
///
/// `Ok(None)` means "not logged in" and the request proceeds without an
/// `Authorization` header. `Err` aborts the request before it is sent.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Result<Option<SecretString>, TokenError>;
}

/// A token provider that can also persist and clear the token.
pub trait TokenStore: TokenProvider {
    fn store(&self, token: &SecretString) -> Result<(), TokenError>;

    fn clear(&self) -> Result<(), TokenError>;
}

// ── NoToken ─────────────────────────────────────────────────────────

/// Provider for anonymous clients: never yields a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn access_token(&self) -> Result<Option<SecretString>, TokenError> {
        Ok(None)
    }
}

// ── MemoryTokenStore ────────────────────────────────────────────────

/// In-process token store. Used by tests and by embedders that manage
/// persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(SecretString::from(token.into()))),
        }
    }
}

impl TokenProvider for MemoryTokenStore {
    fn access_token(&self) -> Result<Option<SecretString>, TokenError> {
        let guard = self
            .token
            .read()
            .map_err(|_| TokenError::Unavailable("token lock poisoned".into()))?;
        Ok(guard.clone())
    }
}

impl TokenStore for MemoryTokenStore {
    fn store(&self, token: &SecretString) -> Result<(), TokenError> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| TokenError::Unavailable("token lock poisoned".into()))?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenError> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| TokenError::Unavailable("token lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

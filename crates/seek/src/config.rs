//! CLI configuration: thin layer over `seek_config`.
//!
//! Applies `GlobalOpts` flag overrides to the loaded config and builds
//! the shared application context every API command runs against.

use std::sync::Arc;

use seek_api::{ApiClient, TokenProvider};
use seek_config::{Config, DurableTokenStore, FileTokenStore, TokenStoreKind};
use seek_core::{Session, Shell};

use crate::cli::{GlobalOpts, TokenStoreArg};
use crate::error::CliError;

pub use seek_config::{config_path, load_config, load_config_or_default, save_config};

/// Loaded config with command-line overrides applied (flag > env > file).
pub fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config()?;
    apply_overrides(&mut cfg, global);
    cfg.validate()?;
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(url) = &global.api_url {
        cfg.api_url = Some(url.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if let Some(kind) = global.token_store {
        cfg.token_store = match kind {
            TokenStoreArg::Keyring => TokenStoreKind::Keyring,
            TokenStoreArg::File => TokenStoreKind::File,
        };
    }
    if global.token_file.is_some() {
        cfg.token_store = TokenStoreKind::File;
    }
}

fn token_store(global: &GlobalOpts, cfg: &Config) -> DurableTokenStore {
    match &global.token_file {
        Some(path) => DurableTokenStore::File(FileTokenStore::new(path.clone())),
        None => DurableTokenStore::from_config(cfg),
    }
}

// ── Application context ─────────────────────────────────────────────

/// Everything a command needs: the shell (routes + API client) and the
/// durable token store the client reads from.
pub struct Context {
    pub shell: Shell,
    pub tokens: Arc<DurableTokenStore>,
}

impl Context {
    pub fn build(global: &GlobalOpts) -> Result<Self, CliError> {
        let config = effective_config(global)?;
        let tokens = Arc::new(token_store(global, &config));
        let provider: Arc<dyn TokenProvider> = tokens.clone();
        let api = ApiClient::configure(config.api_url.as_deref(), provider, &config.transport())?;
        tracing::debug!(
            base_url = %api.base_url(),
            token_store = %tokens.kind(),
            "api client configured"
        );
        let shell = Shell::new(Arc::new(api), config.google_client_id.clone())?;
        Ok(Self { shell, tokens })
    }

    pub fn api(&self) -> &ApiClient {
        self.shell.api()
    }

    pub fn session(&self) -> Session<'_> {
        Session::new(self.shell.api(), self.tokens.as_ref())
    }
}

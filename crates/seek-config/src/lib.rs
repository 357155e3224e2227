//! Shared configuration for Seek tools.
//!
//! TOML config file + `SEEK_*` environment layering (figment), the
//! platform config/data paths, and the durable token stores the API
//! client reads its bearer token from.

pub mod token_store;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use seek_api::TransportConfig;

pub use token_store::{DurableTokenStore, FileTokenStore, KeyringTokenStore, TokenStoreKind};

/// Google identity client id published by the platform.
pub const DEFAULT_GOOGLE_CLIENT_ID: &str =
    "859846322076-3u1k9ter70q7b5jqaum8i7e5jc506mnh.apps.googleusercontent.com";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// API base URL override. Unset or empty means the built-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Where the access token is persisted.
    #[serde(default)]
    pub token_store: TokenStoreKind,

    /// Client id handed to the Google identity login widget.
    #[serde(default = "default_google_client_id")]
    pub google_client_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout: default_timeout(),
            token_store: TokenStoreKind::default(),
            google_client_id: default_google_client_id(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_google_client_id() -> String {
    DEFAULT_GOOGLE_CLIENT_ID.into()
}

impl Config {
    /// Check values figment cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(raw) = self.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
            url::Url::parse(raw.trim()).map_err(|e| ConfigError::Validation {
                field: "api_url".into(),
                reason: format!("{e}: {raw}"),
            })?;
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(Duration::from_secs(self.timeout))
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "seek", "seek")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("seek");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory for persistent data (the file token store lives here).
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(dirs_fallback, |dirs| dirs.data_dir().to_path_buf())
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load config from the canonical path + `SEEK_*` environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + `SEEK_*` environment.
///
/// `SEEK_API_URL`, `SEEK_TIMEOUT`, `SEEK_TOKEN_STORE` and
/// `SEEK_GOOGLE_CLIENT_ID` override the file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SEEK_").only(&[
            "api_url",
            "timeout",
            "token_store",
            "google_client_id",
        ]))
        .extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, falling back to defaults on any error.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
        Config::default()
    })
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    cfg.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.timeout, 30);
        assert_eq!(cfg.token_store, TokenStoreKind::Keyring);
        assert_eq!(cfg.google_client_id, DEFAULT_GOOGLE_CLIENT_ID);
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"http://localhost:5000\"\ntimeout = 5\ntoken_store = \"file\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.api_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(cfg.timeout, 5);
        assert_eq!(cfg.token_store, TokenStoreKind::File);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            api_url: Some("https://api.example".into()),
            timeout: 12,
            token_store: TokenStoreKind::File,
            google_client_id: "abc".into(),
        };
        save_config_to(&cfg, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_url = Config {
            api_url: Some("::not a url".into()),
            ..Config::default()
        };
        assert!(matches!(
            bad_url.validate(),
            Err(ConfigError::Validation { .. })
        ));

        let zero_timeout = Config {
            timeout: 0,
            ..Config::default()
        };
        assert!(zero_timeout.validate().is_err());

        let blank_url = Config {
            api_url: Some(String::new()),
            ..Config::default()
        };
        assert!(blank_url.validate().is_ok());
    }
}

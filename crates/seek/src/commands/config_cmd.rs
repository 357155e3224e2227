//! Config subcommand handlers.

use std::str::FromStr;

use dialoguer::{Input, Select};

use seek_api::DEFAULT_BASE_URL;
use seek_config::{Config, TokenStoreKind};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output::{self, Painter};

const KEYS: &str = "api_url, timeout, token_store, google_client_id";

/// Apply `key = value` to `cfg`.
fn set_key(cfg: &mut Config, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "api_url" | "api-url" => {
            cfg.api_url = (!value.trim().is_empty()).then_some(value);
        }
        "timeout" => {
            cfg.timeout = value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?;
        }
        "token_store" | "token-store" => {
            cfg.token_store =
                TokenStoreKind::from_str(&value).map_err(|_| CliError::Validation {
                    field: "token_store".into(),
                    reason: "must be 'keyring' or 'file'".into(),
                })?;
        }
        "google_client_id" | "google-client-id" => cfg.google_client_id = value,
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {KEYS}"),
            });
        }
    }
    Ok(())
}

fn show(painter: Painter, cfg: &Config) -> String {
    output::detail_lines(
        painter,
        &[
            (
                "api_url",
                cfg.api_url
                    .clone()
                    .unwrap_or_else(|| format!("{DEFAULT_BASE_URL} (default)")),
            ),
            ("timeout", format!("{}s", cfg.timeout)),
            ("token_store", cfg.token_store.to_string()),
            ("google_client_id", cfg.google_client_id.clone()),
        ],
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let path = config::config_path();
            eprintln!("Seek CLI configuration");
            eprintln!("   Config path: {}\n", path.display());

            let api_url: String = Input::new()
                .with_prompt("API URL")
                .default(DEFAULT_BASE_URL.into())
                .interact_text()
                .map_err(CliError::prompt)?;

            let store_choices = &["System keyring (recommended)", "Plain file"];
            let store = Select::new()
                .with_prompt("Where to keep the access token?")
                .items(store_choices)
                .default(0)
                .interact()
                .map_err(CliError::prompt)?;

            let timeout: u64 = Input::new()
                .with_prompt("Request timeout (seconds)")
                .default(30)
                .interact_text()
                .map_err(CliError::prompt)?;

            let cfg = Config {
                api_url: (api_url != DEFAULT_BASE_URL).then_some(api_url),
                timeout,
                token_store: if store == 0 {
                    TokenStoreKind::Keyring
                } else {
                    TokenStoreKind::File
                },
                ..Config::default()
            };
            let written = config::save_config(&cfg)?;

            eprintln!("\nConfiguration written to {}", written.display());
            eprintln!("  Next: seek login");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let painter = Painter::new(&global.color);
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| show(painter, c),
                |_| "config".into(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            set_key(&mut cfg, &key, value)?;
            let written = config::save_config(&cfg)?;
            output::print_status(
                &format!("Set {key} in {}", written.display()),
                global.quiet,
            );
            Ok(())
        }
    }
}

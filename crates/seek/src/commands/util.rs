//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use dialoguer::Input;
use secrecy::SecretString;

use crate::error::CliError;

/// Use the flag value or prompt for it.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(CliError::prompt),
    }
}

/// Use the flag value or read it without echo.
pub fn secret_or_prompt(value: Option<String>, prompt: &str) -> Result<SecretString, CliError> {
    let raw = match value {
        Some(v) => v,
        None => rpassword::prompt_password(format!("{prompt}: ")).map_err(CliError::prompt)?,
    };
    if raw.is_empty() {
        return Err(CliError::Validation {
            field: prompt.to_lowercase(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(SecretString::from(raw))
}

/// Read text from a file, or stdin for `-`.
pub fn read_text(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = read_text(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Cut `text` to at most `max` characters, marking the cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn or_dash(value: Option<&str>) -> String {
    value.map_or_else(|| "-".into(), ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(secret_or_prompt(Some(String::new()), "Password").is_err());
        assert!(secret_or_prompt(Some("pw".into()), "Password").is_ok());
    }
}

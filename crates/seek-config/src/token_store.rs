// ── Durable token stores ──
//
// The access token survives across process runs in either the system
// keyring or a plain file under the data directory. Both read back a
// missing entry as "no token", never as an error.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use seek_api::{ACCESS_TOKEN_KEY, TokenError, TokenProvider, TokenStore};

use crate::Config;

/// Keyring service name the token is filed under.
pub const KEYRING_SERVICE: &str = "seek";

/// Which backend persists the access token.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenStoreKind {
    #[default]
    Keyring,
    File,
}

// ── Keyring ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
    user: String,
}

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }

    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: ACCESS_TOKEN_KEY.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, TokenError> {
        keyring::Entry::new(&self.service, &self.user).map_err(keyring_err)
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

fn keyring_err(e: keyring::Error) -> TokenError {
    TokenError::Unavailable(format!("keyring: {e}"))
}

impl TokenProvider for KeyringTokenStore {
    fn access_token(&self) -> Result<Option<SecretString>, TokenError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(SecretString::from(token))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(keyring_err(e)),
        }
    }
}

impl TokenStore for KeyringTokenStore {
    fn store(&self, token: &SecretString) -> Result<(), TokenError> {
        self.entry()?
            .set_password(token.expose_secret())
            .map_err(keyring_err)?;
        debug!(service = %self.service, "token saved to keyring");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(keyring_err(e)),
        }
    }
}

// ── File ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/access_token`.
    pub fn default_path() -> PathBuf {
        crate::data_dir().join(ACCESS_TOKEN_KEY)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl TokenProvider for FileTokenStore {
    fn access_token(&self) -> Result<Option<SecretString>, TokenError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| SecretString::from(token.to_owned())))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn store(&self, token: &SecretString) -> Result<(), TokenError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = open_owner_only(&self.path)?;
        file.write_all(token.expose_secret().as_bytes())?;
        debug!(path = %self.path.display(), "token saved to file");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Open `path` for writing, truncated, readable by the owner only.
///
/// New files are created 0600; an existing file is narrowed to 0600
/// before anything is written to it.
#[cfg(unix)]
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

// ── Selection ───────────────────────────────────────────────────────

/// The store picked by configuration.
#[derive(Debug, Clone)]
pub enum DurableTokenStore {
    Keyring(KeyringTokenStore),
    File(FileTokenStore),
}

impl DurableTokenStore {
    pub fn from_config(config: &Config) -> Self {
        match config.token_store {
            TokenStoreKind::Keyring => Self::Keyring(KeyringTokenStore::new()),
            TokenStoreKind::File => Self::File(FileTokenStore::default()),
        }
    }

    pub fn kind(&self) -> TokenStoreKind {
        match self {
            Self::Keyring(_) => TokenStoreKind::Keyring,
            Self::File(_) => TokenStoreKind::File,
        }
    }
}

impl TokenProvider for DurableTokenStore {
    fn access_token(&self) -> Result<Option<SecretString>, TokenError> {
        match self {
            Self::Keyring(s) => s.access_token(),
            Self::File(s) => s.access_token(),
        }
    }
}

impl TokenStore for DurableTokenStore {
    fn store(&self, token: &SecretString) -> Result<(), TokenError> {
        match self {
            Self::Keyring(s) => s.store(token),
            Self::File(s) => s.store(token),
        }
    }

    fn clear(&self) -> Result<(), TokenError> {
        match self {
            Self::Keyring(s) => s.clear(),
            Self::File(s) => s.clear(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn missing_file_reads_as_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("access_token"));
        assert!(store.access_token().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("access_token");

        FileTokenStore::new(&path).store(&secret("jwt-abc")).unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(
            reopened.access_token().unwrap().unwrap().expose_secret(),
            "jwt-abc"
        );

        reopened.clear().unwrap();
        assert!(reopened.access_token().unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn blank_file_reads_as_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access_token");
        std::fs::write(&path, "  \n").unwrap();
        assert!(FileTokenStore::new(&path).access_token().unwrap().is_none());

        std::fs::write(&path, "jwt-x\n").unwrap();
        assert_eq!(
            FileTokenStore::new(&path)
                .access_token()
                .unwrap()
                .unwrap()
                .expose_secret(),
            "jwt-x"
        );
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access_token");
        FileTokenStore::new(&path).store(&secret("t")).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_token_file_is_narrowed_and_replaced() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access_token");
        std::fs::write(&path, "old-and-longer-token").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(&path);
        store.store(&secret("new")).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.access_token().unwrap().unwrap().expose_secret(), "new");
    }

    #[test]
    fn kind_parses_from_config_strings() {
        assert_eq!(TokenStoreKind::from_str("file").unwrap(), TokenStoreKind::File);
        assert_eq!(TokenStoreKind::from_str("keyring").unwrap(), TokenStoreKind::Keyring);
        assert_eq!(TokenStoreKind::File.to_string(), "file");
        assert!(TokenStoreKind::from_str("vault").is_err());
    }

    #[test]
    fn selection_follows_config() {
        let cfg = Config {
            token_store: TokenStoreKind::File,
            ..Config::default()
        };
        assert_eq!(DurableTokenStore::from_config(&cfg).kind(), TokenStoreKind::File);
        assert_eq!(
            DurableTokenStore::from_config(&Config::default()).kind(),
            TokenStoreKind::Keyring
        );
    }
}

// ── Session flows ──
//
// Login and logout: the only code that writes the durable token store.
// The API client keeps reading the same store through `TokenProvider`,
// so a stored token takes effect on the very next request.

use secrecy::SecretString;
use tracing::{debug, info, warn};

use seek_api::models::{MessageResponse, SignupRequest};
use seek_api::{ApiClient, TokenStore};

use crate::error::CoreError;

/// Login/logout against one client and one token store.
pub struct Session<'a> {
    api: &'a ApiClient,
    store: &'a dyn TokenStore,
}

impl<'a> Session<'a> {
    pub fn new(api: &'a ApiClient, store: &'a dyn TokenStore) -> Self {
        Self { api, store }
    }

    /// Log in with email + password and persist the returned token.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(), CoreError> {
        let resp = self.api.login(email, password).await?;
        self.store.store(&resp.access_token)?;
        info!(%email, "logged in");
        Ok(())
    }

    /// Log in with a Google identity token and persist the returned token.
    pub async fn google_login(&self, google_token: &SecretString) -> Result<(), CoreError> {
        let resp = self.api.google_login(google_token).await?;
        self.store.store(&resp.access_token)?;
        info!("logged in with google");
        Ok(())
    }

    /// Create an account from a Google identity; the back end logs it in directly.
    pub async fn google_signup(&self, google_token: &SecretString) -> Result<(), CoreError> {
        let resp = self.api.google_signup(google_token).await?;
        self.store.store(&resp.access_token)?;
        info!("signed up with google");
        Ok(())
    }

    /// Register with email + password. Does not log in.
    pub async fn signup(&self, request: &SignupRequest) -> Result<MessageResponse, CoreError> {
        Ok(self.api.signup(request).await?)
    }

    /// End the session: notify the back end, then clear the local token.
    ///
    /// The local token is cleared even when the back end call fails; that
    /// failure is still returned. If clearing fails as well, both errors
    /// come back as [`CoreError::LogoutIncomplete`].
    pub async fn logout(&self) -> Result<(), CoreError> {
        let remote = self.api.logout().await;
        let local = self.store.clear();
        match (remote, local) {
            (Ok(_), Ok(())) => {
                info!("logged out");
                Ok(())
            }
            (Err(remote), Ok(())) => {
                debug!("local token cleared");
                Err(remote.into())
            }
            (Ok(_), Err(local)) => Err(local.into()),
            (Err(remote), Err(local)) => {
                warn!(error = %remote, "back end logout failed");
                Err(CoreError::LogoutIncomplete { remote, local })
            }
        }
    }

    pub fn is_authenticated(&self) -> Result<bool, CoreError> {
        Ok(self.store.access_token()?.is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use secrecy::ExposeSecret;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use seek_api::{MemoryTokenStore, TokenError, TokenProvider, TransportConfig};

    use super::*;

    async fn setup() -> (MockServer, ApiClient, Arc<MemoryTokenStore>) {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryTokenStore::new());
        let api = ApiClient::configure(
            Some(&server.uri()),
            store.clone(),
            &TransportConfig::default(),
        )
        .unwrap();
        (server, api, store)
    }

    #[tokio::test]
    async fn login_persists_token_for_next_request() {
        let (server, api, store) = setup().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "jwt-1", "message": "Login successful"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/weeks"))
            .and(header("Authorization", "Bearer jwt-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "weeks": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::new(&api, store.as_ref());
        assert!(!session.is_authenticated().unwrap());

        session
            .login("a@b.c", &SecretString::from("pw".to_owned()))
            .await
            .unwrap();
        assert!(session.is_authenticated().unwrap());
        assert_eq!(
            store.access_token().unwrap().unwrap().expose_secret(),
            "jwt-1"
        );

        api.list_weeks().await.unwrap();
    }

    #[tokio::test]
    async fn failed_login_leaves_store_empty() {
        let (server, api, store) = setup().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Invalid email or password"
            })))
            .mount(&server)
            .await;

        let session = Session::new(&api, store.as_ref());
        let err = session
            .login("a@b.c", &SecretString::from("bad".to_owned()))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert!(store.access_token().unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_clears_token() {
        let (server, api, store) = setup().await;
        store.store(&SecretString::from("jwt-2".to_owned())).unwrap();

        Mock::given(method("POST"))
            .and(path("/logout"))
            .and(header("Authorization", "Bearer jwt-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Logged out successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::new(&api, store.as_ref());
        session.logout().await.unwrap();
        assert!(store.access_token().unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_clears_token_even_if_backend_fails() {
        let (server, api, store) = setup().await;
        store.store(&SecretString::from("jwt-3".to_owned())).unwrap();

        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let session = Session::new(&api, store.as_ref());
        assert!(session.logout().await.is_err());
        assert!(store.access_token().unwrap().is_none());
    }

    struct StuckStore;

    impl TokenProvider for StuckStore {
        fn access_token(&self) -> Result<Option<SecretString>, TokenError> {
            Ok(Some(SecretString::from("jwt-4".to_owned())))
        }
    }

    impl TokenStore for StuckStore {
        fn store(&self, _token: &SecretString) -> Result<(), TokenError> {
            Ok(())
        }

        fn clear(&self) -> Result<(), TokenError> {
            Err(TokenError::Unavailable("keyring locked".into()))
        }
    }

    #[tokio::test]
    async fn logout_reports_both_failures() {
        let (server, api, _store) = setup().await;

        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "message": "database unavailable"
            })))
            .mount(&server)
            .await;

        let session = Session::new(&api, &StuckStore);
        match session.logout().await.unwrap_err() {
            CoreError::LogoutIncomplete { remote, local } => {
                assert_eq!(remote.status(), Some(500));
                assert!(local.to_string().contains("keyring locked"));
            }
            other => panic!("expected LogoutIncomplete, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn logout_reports_local_failure_after_remote_success() {
        let (server, api, _store) = setup().await;

        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Logged out successfully"
            })))
            .mount(&server)
            .await;

        let session = Session::new(&api, &StuckStore);
        assert!(matches!(
            session.logout().await,
            Err(CoreError::TokenStorage(_))
        ));
    }
}

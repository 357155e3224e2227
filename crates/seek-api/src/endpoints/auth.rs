// Account endpoints: signup, password login, Google login, logout.
//
// These only talk to the API. Persisting the returned token is the
// session layer's job (`seek-core::session`).

use secrecy::SecretString;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Credentials, GoogleTokenRequest, LoginResponse, MessageResponse, SignupRequest};

impl ApiClient {
    /// Register a new account. `POST /signup`
    pub async fn signup(&self, request: &SignupRequest) -> Result<MessageResponse, Error> {
        debug!(email = %request.email, "signing up");
        self.post("/signup", request).await
    }

    /// Exchange email + password for an access token. `POST /login`
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        debug!(%email, "logging in");
        let body = Credentials {
            email: email.to_owned(),
            password: password.clone(),
        };
        self.post("/login", &body).await
    }

    /// Exchange a Google identity access token for an API token. `POST /google_login`
    pub async fn google_login(&self, google_token: &SecretString) -> Result<LoginResponse, Error> {
        debug!("logging in with google");
        let body = GoogleTokenRequest {
            access_token: google_token.clone(),
        };
        self.post("/google_login", &body).await
    }

    /// Create an account from a Google identity and log in. `POST /google_signup`
    pub async fn google_signup(&self, google_token: &SecretString) -> Result<LoginResponse, Error> {
        debug!("signing up with google");
        let body = GoogleTokenRequest {
            access_token: google_token.clone(),
        };
        self.post("/google_signup", &body).await
    }

    /// End the session server-side. `POST /logout`
    pub async fn logout(&self) -> Result<MessageResponse, Error> {
        debug!("logging out");
        self.post_empty("/logout").await
    }
}

// Async HTTP client facade for the Seek back end.
//
// Base URL: override if given, else DEFAULT_BASE_URL
// Auth: `Authorization: Bearer <token>` from the injected TokenProvider

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::TokenProvider;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://seek-backend-0qms.onrender.com";

// ── Error response shape from the back end ───────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Seek REST API.
///
/// Constructed once at startup and shared by reference (or `Arc`).
/// Every request, typed or raw, is built through [`prepare`](Self::prepare),
/// which runs the bearer interceptor before anything touches the network.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client bound to `base_url_override` (if non-empty) or
    /// [`DEFAULT_BASE_URL`], reading tokens from `tokens`.
    pub fn configure(
        base_url_override: Option<&str>,
        tokens: Arc<dyn TokenProvider>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url_override, http, tokens)
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// The JSON headers from [`TransportConfig::default_headers`] are set
    /// per request, so they apply whatever defaults `http` carries.
    pub fn from_reqwest(
        base_url_override: Option<&str>,
        http: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, Error> {
        let raw = Self::resolve_base_url(base_url_override);
        let base_url = Self::normalize_base_url(raw)?;
        debug!(base_url = %base_url, "api client configured");
        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// Pick the override when present and non-blank, else the fallback.
    pub fn resolve_base_url(base_url_override: Option<&str>) -> &str {
        match base_url_override.map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_BASE_URL,
        }
    }

    /// Parse and give the path a trailing slash so relative joins keep
    /// any path prefix of the base (e.g. `https://host/api/`).
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// The resolved base URL every request is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an API path (e.g. `"/weeks/1"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Interceptor ──────────────────────────────────────────────────

    /// Attach `Authorization: Bearer <token>` when a token is stored.
    ///
    /// A failed lookup is returned as [`Error::TokenLookup`]; the request
    /// is dropped unsent. An empty stored token counts as absent.
    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        let token = self
            .tokens
            .access_token()?
            .filter(|t| !t.expose_secret().is_empty());

        let Some(token) = token else {
            trace!("no access token stored, sending unauthenticated");
            return Ok(builder);
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| Error::InvalidToken)?;
        value.set_sensitive(true);
        Ok(builder.header(AUTHORIZATION, value))
    }

    /// Build a request for `method path` with the interceptor applied.
    fn prepare(&self, method: Method, path: &str) -> Result<RequestBuilder, Error> {
        let url = self.url(path)?;
        debug!("{method} {url}");
        let builder = self
            .http
            .request(method, url)
            .headers(TransportConfig::default_headers());
        self.authorize(builder)
    }

    // ── Raw request ──────────────────────────────────────────────────

    /// Issue an arbitrary request and hand back the raw response.
    ///
    /// Non-2xx statuses are *not* turned into errors here; only token
    /// lookup and transport failures are.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, Error> {
        let mut builder = self.prepare(method, path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self.prepare(Method::GET, path)?.send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.prepare(Method::POST, path)?.json(body).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self.prepare(Method::POST, path)?.send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message.or(e.msg))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw.clone()
                }
            });

        // No token clearing or redirect on 401: the caller decides.
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Unauthorized { message };
        }

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::NoToken;

    fn client(base: Option<&str>) -> ApiClient {
        ApiClient::from_reqwest(base, reqwest::Client::new(), Arc::new(NoToken)).unwrap()
    }

    #[test]
    fn missing_override_uses_fallback() {
        assert_eq!(ApiClient::resolve_base_url(None), DEFAULT_BASE_URL);
        assert_eq!(ApiClient::resolve_base_url(Some("")), DEFAULT_BASE_URL);
        assert_eq!(ApiClient::resolve_base_url(Some("   ")), DEFAULT_BASE_URL);
    }

    #[test]
    fn override_is_used_verbatim() {
        assert_eq!(
            ApiClient::resolve_base_url(Some("http://localhost:5000")),
            "http://localhost:5000"
        );
    }

    #[test]
    fn url_join_keeps_path_prefix() {
        let c = client(Some("https://example.com/api"));
        assert_eq!(
            c.url("/weeks/1").unwrap().as_str(),
            "https://example.com/api/weeks/1"
        );
        assert_eq!(c.url("weeks").unwrap().as_str(), "https://example.com/api/weeks");
    }

    #[test]
    fn fallback_base_url_joins() {
        let c = client(None);
        assert_eq!(
            c.url("/login").unwrap().as_str(),
            "https://seek-backend-0qms.onrender.com/login"
        );
    }

    #[test]
    fn invalid_override_is_rejected() {
        let result =
            ApiClient::from_reqwest(Some("not a url"), reqwest::Client::new(), Arc::new(NoToken));
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}

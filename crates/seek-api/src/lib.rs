// seek-api: Async Rust client for the Seek learning platform API
//
// One `ApiClient` per process, bound to a base URL and an injected
// `TokenProvider`. Every outbound request passes through the bearer
// interceptor in `client.rs`; endpoint wrappers live in `endpoints/`.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::{ACCESS_TOKEN_KEY, MemoryTokenStore, NoToken, TokenError, TokenProvider, TokenStore};
pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::Error;
pub use transport::TransportConfig;

pub use reqwest::Method;

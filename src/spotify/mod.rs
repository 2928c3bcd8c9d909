//! # Spotify Integration Module
//!
//! Thin clients for the three external surfaces the server talks to:
//!
//! ```text
//! Endpoint Layer (crate::api)
//!          ↓
//! Spotify Integration Layer
//!     ├── auth   - token endpoint (code exchange, refresh)
//!     ├── tracks - Web API (search, playlist append, profile)
//!     └── batch  - parallel search + single append
//!          ↓
//! reqwest (shared client, per-request timeout)
//! ```
//!
//! All calls go straight through to the provider. Nothing is retried and
//! nothing is cached; a failed call is reported to the endpoint that made it.

use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

use crate::config::Config;

pub mod auth;
pub mod batch;
pub mod tracks;

pub use auth::TokenClient;
pub use tracks::ApiClient;

#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Transport failure, including timeouts and undecodable bodies.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl SpotifyError {
    /// Whether the call ran into the configured request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SpotifyError::Http(e) if e.is_timeout())
    }
}

/// Shared HTTP client for all outbound calls, bounded by the configured
/// request timeout.
pub fn http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.request_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

async fn ensure_success(res: Response) -> Result<Response, SpotifyError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    Err(SpotifyError::Status { status, body })
}

//! Configuration management for tracklift.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. The server never reads the environment after startup: everything is
//! collected once into a [`Config`] which is handed to the clients and the
//! endpoint layer.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory (`<data dir>/tracklift/.env`)
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email playlist-modify-public";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_PLAYLIST_ID: &str = "5sn3spUYxULaAPdyxTLubR";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8888";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Loads environment variables from `.env` files.
///
/// Creates `<data dir>/tracklift` if it does not exist yet, then loads
/// `<data dir>/tracklift/.env` followed by `./.env`. `dotenv` never overrides
/// a variable that is already set, so the real environment always wins.
/// Missing files are skipped silently.
///
/// # Errors
///
/// Returns an error only if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tracklift/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    let _ = dotenv::from_path(&path);
    let _ = dotenv::dotenv();
    Ok(())
}

/// Immutable runtime configuration of the server.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Target playlist of `/add` and `/search`.
    pub playlist_id: String,
    pub server_addr: SocketAddr,
    pub public_dir: PathBuf,
    /// Upper bound for every outbound request.
    pub request_timeout: Duration,
}

impl Config {
    /// Builds a configuration with defaults for everything except the client
    /// credentials and the redirect URI.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Config {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            playlist_id: DEFAULT_PLAYLIST_ID.to_string(),
            server_addr: SocketAddr::from(([0, 0, 0, 0], 8888)),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] when one of `SPOTIFY_API_AUTH_CLIENT_ID`,
    /// `SPOTIFY_API_AUTH_CLIENT_SECRET` or `SPOTIFY_API_REDIRECT_URI` is unset
    /// or empty, [`ConfigError::Invalid`] when `SERVER_ADDRESS` or
    /// `REQUEST_TIMEOUT_SECS` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_addr = optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        let server_addr =
            SocketAddr::from_str(&server_addr).map_err(|_| ConfigError::Invalid {
                name: "SERVER_ADDRESS",
                value: server_addr.clone(),
            })?;

        let timeout = optional(
            "REQUEST_TIMEOUT_SECS",
            &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
        );
        let timeout = timeout
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                value: timeout.clone(),
            })?;

        Ok(Config {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            playlist_id: optional("SPOTIFY_PLAYLIST_ID", DEFAULT_PLAYLIST_ID),
            server_addr,
            public_dir: PathBuf::from(optional("PUBLIC_DIR", DEFAULT_PUBLIC_DIR)),
            request_timeout: Duration::from_secs(timeout),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

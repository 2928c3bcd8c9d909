//! # API Module
//!
//! HTTP endpoints of the tracklift server.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - starts the Authorization Code flow: sets the CSRF state
//!   cookie and redirects to the provider's authorize page.
//! - [`callback`] - checks the state, exchanges the code for tokens and hands
//!   them to the browser (cookie + URL fragment).
//! - [`refresh_token`] - trades a refresh token for a new access token.
//!
//! ### Tracks
//!
//! - [`add`] - adds one track URI to the playlist.
//! - [`single_search`] - returns the first hit for a query.
//! - [`search`] - searches many queries in parallel and adds all hits at once.
//!
//! ### Monitoring
//!
//! - [`health`] - status and version.
//!
//! Track endpoints authenticate through the [`SessionToken`] extractor, which
//! reads the `access_token` and `token_expires_at` cookies.
//!
//! [`SessionToken`]: crate::types::SessionToken

use std::sync::Arc;

use axum::{
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{LOCATION, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};

use crate::{
    config::Config,
    spotify::{self, ApiClient, TokenClient},
    types::Token,
    utils,
};

mod callback;
mod error;
mod health;
mod login;
mod refresh;
mod session;
mod tracks;

pub use callback::callback;
pub use error::ApiError;
pub use health::health;
pub use login::login;
pub use refresh::refresh_token;
pub use tracks::{add, search, single_search};

/// Cookie holding the CSRF state between `/login` and `/callback`.
pub const STATE_KEY: &str = "spotify_auth_state";
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const EXPIRES_AT_KEY: &str = "token_expires_at";

/// Length of the CSRF state.
pub const STATE_LENGTH: usize = 16;

/// Shared, read-only state of all endpoints.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tokens: TokenClient,
    pub api: ApiClient,
}

impl AppState {
    /// Builds the shared HTTP client and both Spotify clients from `config`.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built (e.g. the TLS backend
    /// cannot be initialised).
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = spotify::http_client(&config)?;
        Ok(AppState {
            tokens: TokenClient::new(http.clone(), &config),
            api: ApiClient::new(http, config.api_url.clone()),
            config: Arc::new(config),
        })
    }
}

/// `302` to `/#<pairs>`, setting `cookies` on the way.
pub(crate) fn redirect_home(pairs: &[(&str, &str)], cookies: Vec<String>) -> Response {
    let location = format!("/#{}", utils::encode_pairs(pairs));
    redirect(&location, cookies)
}

pub(crate) fn redirect(location: &str, cookies: Vec<String>) -> Response {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(location) {
        Ok(value) => {
            headers.insert(LOCATION, value);
        }
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
    append_cookies(&mut headers, cookies);

    (StatusCode::FOUND, headers).into_response()
}

pub(crate) fn append_cookies(headers: &mut HeaderMap, cookies: Vec<String>) {
    for cookie in cookies {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            headers.append(SET_COOKIE, value);
        }
    }
}

/// Cookies that make up a browser session for `token`. Both expire together
/// with the access token.
pub(crate) fn session_cookies(token: &Token) -> Vec<String> {
    vec![
        utils::set_cookie(ACCESS_TOKEN_KEY, &token.access_token, Some(token.expires_in)),
        utils::set_cookie(
            EXPIRES_AT_KEY,
            &token.session_expires_at().to_string(),
            Some(token.expires_in),
        ),
    ]
}

use std::sync::Arc;

use axum::{Extension, response::Response};

use crate::utils;

use super::{AppState, STATE_KEY, STATE_LENGTH, redirect};

/// How long the browser keeps the CSRF state, in seconds.
const STATE_MAX_AGE: u64 = 600;

/// Starts the Authorization Code flow.
///
/// Generates a fresh CSRF state, stores it in the `spotify_auth_state`
/// cookie and answers `302` to the provider's authorize page with
/// `response_type=code`, `client_id`, `scope`, `redirect_uri` and `state`.
pub async fn login(Extension(state): Extension<Arc<AppState>>) -> Response {
    let csrf_state = utils::generate_random_string(STATE_LENGTH);
    let config = &state.config;

    let auth_url = format!(
        "{}?{}",
        config.auth_url,
        utils::encode_pairs(&[
            ("response_type", "code"),
            ("client_id", &config.client_id),
            ("scope", &config.scope),
            ("redirect_uri", &config.redirect_uri),
            ("state", &csrf_state),
        ])
    );

    redirect(
        &auth_url,
        vec![utils::set_cookie(STATE_KEY, &csrf_state, Some(STATE_MAX_AGE))],
    )
}

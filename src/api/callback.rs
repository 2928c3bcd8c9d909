use std::sync::Arc;

use axum::{
    Extension,
    extract::Query,
    http::{HeaderMap, header::COOKIE},
    response::Response,
};
use serde::Deserialize;

use crate::{info, spotify::ApiClient, utils, warning};

use super::{ApiError, AppState, STATE_KEY, redirect_home, session_cookies};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Completes the Authorization Code flow.
///
/// The `state` query parameter has to equal the state cookie set by
/// `/login`; otherwise the code is never looked at. The state cookie is
/// dropped on every answer.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    headers: HeaderMap,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let stored_state = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| utils::find_cookie(header, STATE_KEY));

    match (&params.state, &stored_state) {
        (Some(received), Some(stored)) if received == stored => {}
        _ => {
            warning!("Callback state does not match the stored state.");
            return Err(ApiError::StateMismatch);
        }
    }

    if let Some(reason) = params.error {
        warning!("Authorization denied by provider: {}", reason);
        return Err(ApiError::AuthorizationDenied(reason));
    }

    let Some(code) = params.code.filter(|code| !code.is_empty()) else {
        return Err(ApiError::TokenExchangeFailed("missing code".to_string()));
    };

    let token = state
        .tokens
        .exchange_code(&code, &state.config.redirect_uri)
        .await
        .map_err(|e| {
            warning!("Token exchange failed: {}", e);
            ApiError::TokenExchangeFailed(e.to_string())
        })?;

    tokio::spawn(log_profile(state.api.clone(), token.access_token.clone()));

    let mut cookies = session_cookies(&token);
    cookies.push(utils::clear_cookie(STATE_KEY));

    Ok(redirect_home(
        &[
            ("access_token", &token.access_token),
            ("refresh_token", &token.refresh_token),
        ],
        cookies,
    ))
}

async fn log_profile(api: ApiClient, access_token: String) {
    match api.fetch_profile(&access_token).await {
        Ok(profile) => info!(
            "Logged in as {}",
            profile.display_name.as_deref().unwrap_or(&profile.id)
        ),
        Err(e) => warning!("Could not fetch profile: {}", e),
    }
}

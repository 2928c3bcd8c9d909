use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Query,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::warning;

use super::{ApiError, AppState, append_cookies, session_cookies};

#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    pub refresh_token: Option<String>,
}

/// Exchanges `refresh_token` for a new access token.
///
/// Answers `{"access_token", "expires_in"}` and renews the session cookies.
/// A rejected refresh token is answered with 401.
pub async fn refresh_token(
    Query(params): Query<RefreshParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let refresh_token = params
        .refresh_token
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::MissingParameter("refresh_token"))?;

    let token = state.tokens.refresh(&refresh_token).await.map_err(|e| {
        warning!("Token refresh failed: {}", e);
        ApiError::RefreshFailed("refresh token was rejected".to_string())
    })?;

    let mut headers = HeaderMap::new();
    append_cookies(&mut headers, session_cookies(&token));

    let body = json!({
        "access_token": token.access_token,
        "expires_in": token.expires_in,
    });

    Ok((headers, Json(body)).into_response())
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{spotify::batch::BatchError, utils};

use super::{STATE_KEY, redirect_home};

/// Everything an endpoint can answer with besides success.
///
/// The two OAuth failures are answered with a redirect to the front page
/// carrying `error=<code>` in the fragment. All others become a JSON body
/// `{"error": <code>, "message": <text>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("state mismatch")]
    StateMismatch,
    #[error("token exchange failed: {0}")]
    TokenExchangeFailed(String),
    /// Authorization denied by the provider, e.g. `access_denied`.
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),
    #[error("{0}")]
    SearchMiss(String),
    #[error("{0}")]
    SearchFailed(String),
    #[error("{0}")]
    AppendFailed(String),
    #[error("{0}")]
    RefreshFailed(String),
    #[error("no access token, log in first")]
    MissingToken,
    #[error("access token expired, refresh it")]
    TokenExpired,
    #[error("missing query parameter `{0}`")]
    MissingParameter(&'static str),
}

impl ApiError {
    /// Machine readable code, used as `error` in the JSON body or fragment.
    pub fn code(&self) -> &str {
        match self {
            ApiError::StateMismatch => "state_mismatch",
            ApiError::TokenExchangeFailed(_) => "invalid_token",
            ApiError::AuthorizationDenied(reason) => reason.as_str(),
            ApiError::SearchMiss(_) => "search_miss",
            ApiError::SearchFailed(_) => "search_failed",
            ApiError::AppendFailed(_) => "append_failed",
            ApiError::RefreshFailed(_) => "refresh_failed",
            ApiError::MissingToken => "missing_token",
            ApiError::TokenExpired => "token_expired",
            ApiError::MissingParameter(_) => "missing_parameter",
        }
    }

    /// HTTP status the error is answered with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::StateMismatch
            | ApiError::TokenExchangeFailed(_)
            | ApiError::AuthorizationDenied(_) => StatusCode::FOUND,
            ApiError::SearchMiss(_) => StatusCode::NOT_FOUND,
            ApiError::SearchFailed(_) | ApiError::AppendFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::RefreshFailed(_) | ApiError::MissingToken | ApiError::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<BatchError> for ApiError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::Miss { .. } => ApiError::SearchMiss(err.to_string()),
            BatchError::Search { query, .. } => {
                ApiError::SearchFailed(format!("search for {:?} failed", query))
            }
            BatchError::Task(_) => ApiError::SearchFailed("a search did not complete".to_string()),
            BatchError::Append(_) => {
                ApiError::AppendFailed("adding tracks to the playlist failed".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status() == StatusCode::FOUND {
            return redirect_home(
                &[("error", self.code())],
                vec![utils::clear_cookie(STATE_KEY)],
            );
        }

        let body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

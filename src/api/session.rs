use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};

use crate::{types::SessionToken, utils};

use super::{ACCESS_TOKEN_KEY, ApiError, EXPIRES_AT_KEY};

/// Reads the session from the request cookies.
///
/// Rejects with [`ApiError::MissingToken`] when there is no access token and
/// with [`ApiError::TokenExpired`] once `token_expires_at` is reached.
/// A session without an expiry cookie is accepted as is.
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookies: Vec<&str> = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();

        let lookup = |name: &str| cookies.iter().find_map(|header| utils::find_cookie(header, name));

        let access_token = lookup(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingToken)?;
        let expires_at = lookup(EXPIRES_AT_KEY).and_then(|value| value.parse::<u64>().ok());

        let session = SessionToken::new(access_token, expires_at);
        if session.is_expired() {
            return Err(ApiError::TokenExpired);
        }

        Ok(session)
    }
}

use reqwest::{Client, StatusCode, header::AUTHORIZATION};

use crate::{
    config::Config,
    types::{Token, TokenResponse},
    utils,
};

use super::SpotifyError;

/// Client for the provider's token endpoint.
///
/// Both grants authenticate with HTTP Basic credentials built from the
/// client id and secret.
#[derive(Clone)]
pub struct TokenClient {
    http: Client,
    token_url: String,
    authorization: String,
}

impl TokenClient {
    /// Creates a token client from the configured token URL and client
    /// credentials. The Basic `Authorization` value is computed once here.
    pub fn new(http: Client, config: &Config) -> Self {
        TokenClient {
            http,
            token_url: config.token_url.clone(),
            authorization: utils::basic_auth_header(&config.client_id, &config.client_secret),
        }
    }

    /// Exchanges an authorization code for an access and refresh token.
    ///
    /// Posts `code`, `redirect_uri` and `grant_type=authorization_code` as a
    /// form to the token endpoint.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code received on `/callback`
    /// * `redirect_uri` - Must be the one sent to the authorize endpoint
    ///
    /// # Returns
    ///
    /// A [`Token`] with access token, refresh token, scope and lifetime,
    /// stamped with the current time.
    ///
    /// # Errors
    ///
    /// Anything but a 200 answer carrying an `access_token`, as well as
    /// transport errors and timeouts.
    ///
    /// # Example
    ///
    /// ```
    /// let token = tokens.exchange_code("AQA...code", &config.redirect_uri).await?;
    /// println!("expires in {}s", token.expires_in);
    /// ```
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<Token, SpotifyError> {
        let res = self
            .request_token(&[
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .await?;

        Ok(Token::from_response(res, None))
    }

    /// Trades a refresh token for a new access token.
    ///
    /// When the provider does not rotate the refresh token, the returned
    /// token carries the one passed in.
    ///
    /// # Errors
    ///
    /// Same as [`TokenClient::exchange_code`]; an expired or revoked refresh
    /// token shows up as [`SpotifyError::Status`].
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token, SpotifyError> {
        let res = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await?;

        Ok(Token::from_response(res, Some(refresh_token)))
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, SpotifyError> {
        let res = self
            .http
            .post(&self.token_url)
            .header(AUTHORIZATION, &self.authorization)
            .form(form)
            .send()
            .await?;

        // The token endpoint answers 200 on success, nothing else counts.
        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(SpotifyError::Status { status, body });
        }

        Ok(res.json::<TokenResponse>().await?)
    }
}

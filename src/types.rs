use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A session is treated as expired this many seconds before the provider's
/// own deadline, or half way through the token's lifetime for short-lived
/// tokens.
pub const EXPIRY_MARGIN_SECS: u64 = 60;

const DEFAULT_EXPIRES_IN: u64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Builds a token from the token endpoint's answer.
    ///
    /// Refresh responses usually omit `refresh_token`; `previous_refresh`
    /// is kept in that case.
    pub fn from_response(res: TokenResponse, previous_refresh: Option<&str>) -> Self {
        Token {
            access_token: res.access_token,
            refresh_token: res
                .refresh_token
                .or_else(|| previous_refresh.map(str::to_string))
                .unwrap_or_default(),
            scope: res.scope.unwrap_or_default(),
            expires_in: res.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }

    /// Provider deadline as a unix timestamp.
    pub fn expires_at(&self) -> u64 {
        self.obtained_at.saturating_add(self.expires_in)
    }

    /// Seconds before [`Token::expires_at`] from which a session using this
    /// token counts as expired. Never more than half the lifetime, so a
    /// fresh token is always usable.
    pub fn refresh_margin(&self) -> u64 {
        EXPIRY_MARGIN_SECS.min(self.expires_in / 2)
    }

    /// Unix timestamp from which a session using this token counts as
    /// expired.
    pub fn session_expires_at(&self) -> u64 {
        self.expires_at() - self.refresh_margin()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

/// The bearer token a browser session carries around in its cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub access_token: String,
    /// Unix timestamp from which the session counts as expired (the
    /// provider deadline minus the refresh margin). `None` when the browser
    /// did not send one.
    pub expires_at: Option<u64>,
}

impl SessionToken {
    pub fn new(access_token: impl Into<String>, expires_at: Option<u64>) -> Self {
        SessionToken {
            access_token: access_token.into(),
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp() as u64)
    }
}

impl From<&Token> for SessionToken {
    fn from(token: &Token) -> Self {
        SessionToken::new(token.access_token.clone(), Some(token.session_expires_at()))
    }
}

/// First hit of a track search. Fields other than `id`, `name` and `uri` are
/// kept as-is so the full object can be handed back to the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Tracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tracks {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

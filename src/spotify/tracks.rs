use reqwest::Client;

use crate::types::{AddTrackToPlaylistResponse, Profile, SearchResponse, Track};

use super::{SpotifyError, ensure_success};

/// Bearer-authenticated client for the Web API.
///
/// The client itself holds no credentials; every call takes the access token
/// of the browser session it acts for.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api_url: String,
}

impl ApiClient {
    /// Creates a client for the Web API rooted at `api_url`.
    ///
    /// A trailing slash on `api_url` is dropped so paths can be appended
    /// with `format!("{}/search", ..)`.
    ///
    /// # Example
    ///
    /// ```
    /// let api = ApiClient::new(reqwest::Client::new(), "https://api.spotify.com/v1/");
    /// ```
    pub fn new(http: Client, api_url: impl Into<String>) -> Self {
        ApiClient {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Searches for a track and returns the first hit.
    ///
    /// Calls `GET /search?q=<query>&type=track&limit=1`.
    ///
    /// # Arguments
    ///
    /// * `token` - Access token of the browser session
    /// * `query` - Free-text search string
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Track))` - The first hit, with every field the provider sent
    /// - `Ok(None)` - The provider found nothing
    ///
    /// # Errors
    ///
    /// Transport errors, timeouts, non-2xx statuses and bodies that do not
    /// look like a search result.
    ///
    /// # Example
    ///
    /// ```
    /// match api.search_track(&session.access_token, "around the world").await? {
    ///     Some(track) => println!("{}", track.uri),
    ///     None => println!("no luck"),
    /// }
    /// ```
    pub async fn search_track(&self, token: &str, query: &str) -> Result<Option<Track>, SpotifyError> {
        let res = self
            .http
            .get(format!("{}/search", self.api_url))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .send()
            .await?;

        let search: SearchResponse = ensure_success(res).await?.json().await?;
        Ok(search.tracks.items.into_iter().next())
    }

    /// Adds `uris` to a playlist in one call.
    ///
    /// The URIs are sent comma-joined as the `uris` query parameter of
    /// `POST /playlists/{playlist_id}/tracks`.
    ///
    /// # Arguments
    ///
    /// * `token` - Access token of the browser session
    /// * `playlist_id` - Target playlist
    /// * `uris` - Track URIs, in the order they should be added
    ///
    /// # Returns
    ///
    /// The playlist's new snapshot id when the provider sends one. Any 2xx
    /// answer counts as success.
    ///
    /// # Errors
    ///
    /// Transport errors, timeouts and non-2xx statuses.
    pub async fn append_to_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<String>, SpotifyError> {
        let res = self
            .http
            .post(format!("{}/playlists/{}/tracks", self.api_url, playlist_id))
            .bearer_auth(token)
            .query(&[("uris", uris.join(","))])
            .send()
            .await?;

        let res = ensure_success(res).await?;
        let snapshot = res
            .json::<AddTrackToPlaylistResponse>()
            .await
            .ok()
            .map(|body| body.snapshot_id);

        Ok(snapshot)
    }

    /// Fetches the profile of the token's owner from `GET /me`.
    ///
    /// Only used for logging who logged in; the result never reaches the
    /// browser.
    pub async fn fetch_profile(&self, token: &str) -> Result<Profile, SpotifyError> {
        let res = self
            .http
            .get(format!("{}/me", self.api_url))
            .bearer_auth(token)
            .send()
            .await?;

        Ok(ensure_success(res).await?.json().await?)
    }
}

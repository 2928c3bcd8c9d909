use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Query,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    spotify::batch,
    success,
    types::SessionToken,
    utils, warning,
};

use super::{ApiError, AppState};

const SUCCESS_BODY: &str = "yay!!";
const NO_MATCH_BODY: &str = "no luck";

#[derive(Debug, Deserialize)]
pub struct TrackParams {
    pub track: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TracksParams {
    pub tracks: Option<String>,
}

/// Adds a single track URI to the playlist.
pub async fn add(
    session: SessionToken,
    Query(params): Query<TrackParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<&'static str, ApiError> {
    let uri = params
        .track
        .filter(|track| !track.is_empty())
        .ok_or(ApiError::MissingParameter("track"))?;

    state
        .api
        .append_to_playlist(&session.access_token, &state.config.playlist_id, &[uri.clone()])
        .await
        .map_err(|e| {
            warning!("Adding {} failed: {}", uri, e);
            ApiError::AppendFailed("adding the track to the playlist failed".to_string())
        })?;

    success!("Added {}", uri);
    Ok(SUCCESS_BODY)
}

/// Returns the first search hit as JSON, or `no luck`.
///
/// A failed search is reported the same way as an empty one.
pub async fn single_search(
    session: SessionToken,
    Query(params): Query<TrackParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let query = params
        .track
        .filter(|track| !track.is_empty())
        .ok_or(ApiError::MissingParameter("track"))?;

    match state.api.search_track(&session.access_token, &query).await {
        Ok(Some(track)) => Ok(Json(track).into_response()),
        Ok(None) => Ok(NO_MATCH_BODY.into_response()),
        Err(e) => {
            warning!("Search for {:?} failed: {}", query, e);
            Ok(NO_MATCH_BODY.into_response())
        }
    }
}

/// Searches every comma separated entry of `tracks` and adds all hits to the
/// playlist in one go. Nothing is added unless every entry matched.
pub async fn search(
    session: SessionToken,
    Query(params): Query<TracksParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<&'static str, ApiError> {
    let tracks = params.tracks.ok_or(ApiError::MissingParameter("tracks"))?;
    let queries = utils::split_track_list(&tracks);

    let outcome = batch::search_and_append(
        &state.api,
        &session.access_token,
        &state.config.playlist_id,
        &queries,
    )
    .await
    .map_err(|e| {
        warning!("Batch search failed: {}", e);
        ApiError::from(e)
    })?;

    success!("Added {} track(s)", outcome.uris.len());
    Ok(SUCCESS_BODY)
}

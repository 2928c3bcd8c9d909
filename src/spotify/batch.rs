//! Parallel search followed by a single playlist append.
//!
//! Every query is searched in its own task. The batch is all-or-nothing: one
//! miss or failed search and the playlist is left untouched. Tasks are never
//! cancelled early; the join waits until each of them has settled.

use thiserror::Error;
use tokio::task::{JoinError, JoinSet};

use super::{ApiClient, SpotifyError};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("no track found for {query:?}")]
    Miss { query: String },
    #[error("search for {query:?} failed: {source}")]
    Search { query: String, source: SpotifyError },
    #[error("search task failed: {0}")]
    Task(#[from] JoinError),
    #[error("adding tracks to the playlist failed: {0}")]
    Append(SpotifyError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Resolved track URIs in query order.
    pub uris: Vec<String>,
    pub snapshot_id: Option<String>,
}

/// Resolves every query to the URI of its first search hit.
///
/// The result is in the same order as `queries`, whatever order the searches
/// finish in. When several queries fail, the error reported is the one of the
/// earliest query.
pub async fn resolve_uris(
    client: &ApiClient,
    token: &str,
    queries: &[String],
) -> Result<Vec<String>, BatchError> {
    let mut set = JoinSet::new();
    for (index, query) in queries.iter().enumerate() {
        let client = client.clone();
        let token = token.to_string();
        let query = query.clone();
        set.spawn(async move {
            let result = client.search_track(&token, &query).await;
            (index, result)
        });
    }

    let mut settled: Vec<Option<Result<Option<String>, SpotifyError>>> =
        (0..queries.len()).map(|_| None).collect();
    let mut task_error = None;

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, result)) => {
                settled[index] = Some(result.map(|track| track.map(|t| t.uri)));
            }
            Err(e) => {
                task_error.get_or_insert(e);
            }
        }
    }

    if let Some(e) = task_error {
        return Err(BatchError::Task(e));
    }

    let mut uris = Vec::with_capacity(queries.len());
    for (query, result) in queries.iter().zip(settled) {
        match result {
            Some(Ok(Some(uri))) => uris.push(uri),
            Some(Ok(None)) | None => return Err(BatchError::Miss { query: query.clone() }),
            Some(Err(source)) => {
                return Err(BatchError::Search {
                    query: query.clone(),
                    source,
                });
            }
        }
    }

    Ok(uris)
}

/// Searches all `queries` in parallel and, when every one of them resolved,
/// adds the hits to `playlist_id` in one call.
///
/// # Arguments
///
/// * `client` - Web API client, cloned into every search task
/// * `token` - Access token of the browser session
/// * `playlist_id` - Target playlist
/// * `queries` - Search strings, one per track
///
/// # Returns
///
/// The resolved URIs in query order and the playlist snapshot id. An empty
/// query list succeeds without any search or append.
///
/// # Errors
///
/// - [`BatchError::Miss`] / [`BatchError::Search`] / [`BatchError::Task`] -
///   a search did not resolve; the playlist is untouched
/// - [`BatchError::Append`] - every search resolved but the append failed
///
/// # Example
///
/// ```
/// let queries = utils::split_track_list("one more time, aerodynamic");
/// let outcome = search_and_append(&api, &token, &playlist_id, &queries).await?;
/// println!("added {} tracks", outcome.uris.len());
/// ```
pub async fn search_and_append(
    client: &ApiClient,
    token: &str,
    playlist_id: &str,
    queries: &[String],
) -> Result<BatchOutcome, BatchError> {
    if queries.is_empty() {
        return Ok(BatchOutcome {
            uris: Vec::new(),
            snapshot_id: None,
        });
    }

    let uris = resolve_uris(client, token, queries).await?;
    let snapshot_id = client
        .append_to_playlist(token, playlist_id, &uris)
        .await
        .map_err(BatchError::Append)?;

    Ok(BatchOutcome { uris, snapshot_id })
}

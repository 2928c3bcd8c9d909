// Fake Spotify plus a running tracklift server wired to it.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::redirect::Policy;
use serde_json::json;
use tracklift::{api::AppState, config::Config, server, utils};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const REDIRECT_URI: &str = "http://localhost:8888/callback";
pub const PLAYLIST_ID: &str = "test-playlist";

pub const GOOD_CODE: &str = "good-code";
pub const ACCESS_TOKEN: &str = "access-1";
pub const REFRESH_TOKEN: &str = "refresh-1";
pub const REFRESHED_ACCESS_TOKEN: &str = "access-2";

/// What the fake provider saw.
#[derive(Default)]
pub struct Provider {
    pub token_requests: Mutex<Vec<HashMap<String, String>>>,
    pub searches: Mutex<Vec<String>>,
    pub appends: Mutex<Vec<(String, String)>>,
    pub profile_fetches: Mutex<usize>,
}

impl Provider {
    pub fn appends(&self) -> Vec<(String, String)> {
        self.appends.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn token_requests(&self) -> Vec<HashMap<String, String>> {
        self.token_requests.lock().unwrap().clone()
    }
}

pub struct Harness {
    pub base: String,
    pub provider: Arc<Provider>,
    pub provider_base: String,
    pub client: reqwest::Client,
}

impl Harness {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .header(reqwest::header::COOKIE, cookie)
            .send()
            .await
            .unwrap()
    }

    /// GET with a valid session cookie.
    pub async fn get_authed(&self, path: &str) -> reqwest::Response {
        self.get_with_cookie(path, &format!("access_token={}", ACCESS_TOKEN))
            .await
    }
}

pub async fn spawn() -> Harness {
    let provider = Arc::new(Provider::default());
    let provider_addr = serve(fake_spotify(Arc::clone(&provider))).await;
    let provider_base = format!("http://{}", provider_addr);

    let mut config = Config::new(CLIENT_ID, CLIENT_SECRET, REDIRECT_URI);
    config.auth_url = format!("{}/authorize", provider_base);
    config.token_url = format!("{}/api/token", provider_base);
    config.api_url = format!("{}/v1", provider_base);
    config.playlist_id = PLAYLIST_ID.to_string();
    config.public_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/public");
    config.request_timeout = Duration::from_millis(500);

    let state = AppState::new(config).unwrap();
    let addr = serve(server::router(state)).await;

    Harness {
        base: format!("http://{}", addr),
        provider,
        provider_base,
        client: reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap(),
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// `Set-Cookie` headers of a response.
pub fn set_cookies(res: &reqwest::Response) -> Vec<String> {
    res.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub fn location(res: &reqwest::Response) -> String {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn fake_spotify(provider: Arc<Provider>) -> Router {
    Router::new()
        .route("/api/token", post(token))
        .route("/v1/search", get(search))
        .route("/v1/playlists/{id}/tracks", post(append))
        .route("/v1/me", get(me))
        .with_state(provider)
}

async fn token(
    State(provider): State<Arc<Provider>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    provider.token_requests.lock().unwrap().push(form.clone());

    let expected = utils::basic_auth_header(CLIENT_ID, CLIENT_SECRET);
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid_client"}))).into_response();
    }

    let grant = form.get("grant_type").map(String::as_str);
    match grant {
        Some("authorization_code") if form.get("code").map(String::as_str) == Some(GOOD_CODE) => {
            Json(json!({
                "access_token": ACCESS_TOKEN,
                "refresh_token": REFRESH_TOKEN,
                "scope": "user-read-private user-read-email playlist-modify-public",
                "expires_in": 3600,
                "token_type": "Bearer"
            }))
            .into_response()
        }
        Some("refresh_token")
            if form.get("refresh_token").map(String::as_str) == Some(REFRESH_TOKEN) =>
        {
            Json(json!({
                "access_token": REFRESHED_ACCESS_TOKEN,
                "expires_in": 3600,
                "token_type": "Bearer"
            }))
            .into_response()
        }
        _ => (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_grant"}))).into_response(),
    }
}

/// Queries starting with `miss` find nothing, `broken` fails, `hang` outlives
/// the client timeout and `late` answers after a short delay. Anything else
/// resolves to `spotify:track:<query>`.
async fn search(
    State(provider): State<Arc<Provider>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !has_bearer(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let query = params.get("q").cloned().unwrap_or_default();
    provider.searches.lock().unwrap().push(query.clone());

    if params.get("type").map(String::as_str) != Some("track")
        || params.get("limit").map(String::as_str) != Some("1")
    {
        return StatusCode::BAD_REQUEST.into_response();
    }

    if query.starts_with("miss") {
        return Json(json!({"tracks": {"items": [], "total": 0}})).into_response();
    }
    if query == "broken" {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if query == "hang" {
        tokio::time::sleep(Duration::from_secs(3)).await;
    }
    if query.starts_with("late") {
        tokio::time::sleep(Duration::from_millis(150)).await;
    }

    Json(json!({
        "tracks": {
            "items": [{
                "id": query,
                "name": format!("Song {}", query),
                "uri": format!("spotify:track:{}", query),
                "popularity": 42,
                "artists": [{"name": "Someone"}]
            }],
            "total": 1
        }
    }))
    .into_response()
}

async fn append(
    State(provider): State<Arc<Provider>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !has_bearer(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let uris = params.get("uris").cloned().unwrap_or_default();
    provider.appends.lock().unwrap().push((id, uris.clone()));

    if uris.contains("reject") {
        return (StatusCode::FORBIDDEN, Json(json!({"error": {"status": 403}}))).into_response();
    }

    (StatusCode::CREATED, Json(json!({"snapshot_id": "snap-1"}))).into_response()
}

async fn me(State(provider): State<Arc<Provider>>) -> Response {
    *provider.profile_fetches.lock().unwrap() += 1;
    Json(json!({"id": "tester", "display_name": "Tester", "email": "t@example.com"})).into_response()
}

fn has_bearer(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Bearer ") && value.len() > "Bearer ".len())
}

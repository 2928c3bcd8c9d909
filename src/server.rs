use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{Res, api, api::AppState, config::Config, info};

/// All routes of the server. Unknown paths fall through to the static files
/// in the configured public directory.
pub fn router(state: AppState) -> Router {
    let public_dir = state.config.public_dir.clone();

    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/refresh_token", get(api::refresh_token))
        .route("/add", get(api::add))
        .route("/single-search", get(api::single_search))
        .route("/search", get(api::search))
        .fallback_service(ServeDir::new(public_dir))
        .layer(Extension(Arc::new(state)))
        .layer(CorsLayer::permissive())
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = config.server_addr;
    let app = router(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

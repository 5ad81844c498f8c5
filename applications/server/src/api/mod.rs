/// API route modules
pub mod health;
pub mod playlists;
pub mod songs;

use crate::{middleware, state::AppState};
use axum::{
    http::{header, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
///
/// When `web_dir` is set, unknown paths are served from it, falling back to
/// its `index.html` so client-side routes survive a reload.
pub fn router(app_state: AppState, web_dir: Option<&Path>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/search/songs", get(songs::search_songs))
        .route("/songs/:id", get(songs::get_song))
        .route("/trending/songs", get(songs::trending_songs))
        .route("/playlists/top", get(songs::top_playlists));

    // Protected routes (auth required)
    let library_routes = Router::new()
        .route(
            "/playlists",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route("/playlists/smart", post(playlists::create_smart_playlist))
        .route(
            "/playlists/:id",
            get(playlists::get_playlist).delete(playlists::delete_playlist),
        )
        .route("/playlists/:id/songs", post(playlists::add_song))
        .route(
            "/playlists/:id/songs/:song_id",
            axum::routing::delete(playlists::remove_song),
        )
        .route("/liked", get(playlists::liked_songs))
        .route("/liked/toggle", post(playlists::toggle_liked))
        .route("/liked/:song_id", get(playlists::liked_status))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    let mut app = Router::new().nest("/api", public_routes.nest("/library", library_routes));

    if let Some(web_dir) = web_dir {
        let spa = ServeDir::new(web_dir).fallback(ServeFile::new(web_dir.join("index.html")));
        app = app.fallback_service(spa);
    }

    app.layer(
        TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(false)),
    )
    .layer(cors())
    .with_state(app_state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

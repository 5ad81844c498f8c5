//! Common test utilities and fixtures

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use cadence_core::{CatalogService, Result, Track, TrackId, UserId};
use cadence_server::{api, services::AuthService, state::AppState};
use cadence_storage::SqlitePlaylistStore;
use mockall::mock;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

mock! {
    pub Catalog {}

    #[async_trait::async_trait]
    impl CatalogService for Catalog {
        async fn search_songs(&self, query: &str) -> Result<Vec<Track>>;
        async fn get_song(&self, id: &TrackId) -> Result<Option<Track>>;
        async fn trending_songs(&self) -> Result<Vec<Track>>;
        async fn top_playlists(&self) -> Result<Vec<Track>>;
    }
}

pub const TEST_SECRET: &str = "test-secret-key";

/// Router wired to a mock catalog and a real SQLite store in a temp dir
pub struct TestApp {
    pub router: Router,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new(catalog: MockCatalog) -> Self {
        Self::with_web_dir(catalog, None).await
    }

    pub async fn with_web_dir(catalog: MockCatalog, web_dir: Option<&std::path::Path>) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = cadence_storage::create_pool(&db_url).await.unwrap();
        cadence_storage::run_migrations(&pool).await.unwrap();

        let auth_service = Arc::new(AuthService::new(TEST_SECRET, 1));
        let app_state = AppState::new(
            Arc::new(catalog),
            Arc::new(SqlitePlaylistStore::new(pool)),
            Arc::clone(&auth_service),
        );

        Self {
            router: api::router(app_state, web_dir),
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Bearer token for `user`
    pub fn token(&self, user: &str) -> String {
        self.auth_service.create_token(&UserId::new(user)).unwrap()
    }

    /// Send a request and decode the JSON body (`Null` when empty or not JSON)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }
}

/// Test fixtures
pub mod fixtures {
    use cadence_core::Track;

    pub fn track(id: &str) -> Track {
        Track::new(id, format!("Song {}", id), "Test Artist")
            .with_stream_url(format!("https://cdn.example/{}.mp4", id))
            .with_duration(200)
    }

    pub fn tracks(count: usize) -> Vec<Track> {
        (0..count).map(|i| track(&format!("t{}", i))).collect()
    }
}

/// Shared application state
use crate::services::AuthService;
use cadence_core::{CatalogService, PlaylistStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogService>,
    pub playlists: Arc<dyn PlaylistStore>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        playlists: Arc<dyn PlaylistStore>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        Self {
            catalog,
            playlists,
            auth_service,
        }
    }
}

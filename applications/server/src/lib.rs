//! Cadence Server Library
//!
//! REST proxy in front of the third-party music catalog, plus per-user
//! playlists and liked songs stored in `SQLite`.
//!
//! Catalog routes are public; everything under `/api/library` needs a bearer
//! token whose `sub` claim names the user. The library is exposed so the
//! router can be driven in-process by tests.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::auth::AuthService;
pub use state::AppState;

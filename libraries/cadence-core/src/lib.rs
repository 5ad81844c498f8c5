//! Cadence Core
//!
//! Domain types, collaborator traits and error handling shared by every
//! Cadence crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist` and their identifiers
//! - **Collaborator Traits**: `CatalogService` (third-party music catalog)
//!   and `PlaylistStore` (per-user playlists and liked songs)
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! Hosts hold collaborators as `Arc<dyn Trait>` and hand them to whatever
//! needs them; nothing in the workspace reaches for a global instance.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{PlaylistId, Track, UserId};
//!
//! let track = Track::new("abc123", "Kesariya", "Arijit Singh")
//!     .with_stream_url("https://cdn.example.com/abc123_320.mp4")
//!     .with_duration(268);
//! assert_eq!(track.formatted_duration(), "4:28");
//!
//! let owner = UserId::new("alice");
//! assert_eq!(PlaylistId::liked_for(&owner).as_str(), "liked_alice");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CadenceError, Result};
pub use traits::{CatalogService, PlaylistStore};
pub use types::{CreatePlaylist, Playlist, PlaylistId, Track, TrackId, UserId, LIKED_SONGS_NAME};

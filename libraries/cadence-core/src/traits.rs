//! Collaborator traits
//!
//! Each trait is an explicit seam: hosts construct one implementation at
//! startup and pass it around as `Arc<dyn Trait>`.

use crate::error::Result;
use crate::types::{CreatePlaylist, Playlist, PlaylistId, Track, TrackId, UserId};
use async_trait::async_trait;

/// Read-only access to the third-party music catalog
///
/// Implementations normalize the provider's payloads into [`Track`]s.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Free-text song search
    async fn search_songs(&self, query: &str) -> Result<Vec<Track>>;

    /// Look up a single song; `Ok(None)` when the provider has no such id
    async fn get_song(&self, id: &TrackId) -> Result<Option<Track>>;

    /// Currently trending songs
    async fn trending_songs(&self) -> Result<Vec<Track>>;

    /// Songs from the provider's top charts
    async fn top_playlists(&self) -> Result<Vec<Track>>;
}

/// Per-user playlist persistence
///
/// Every owner has exactly one default ("Liked Songs") playlist. It is
/// created the first time the owner's playlists are read and cannot be
/// deleted.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create a playlist and return its id
    ///
    /// Fails with `Duplicate` when asked to create a second default playlist.
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<PlaylistId>;

    /// All of the owner's playlists, default first
    async fn list_playlists(&self, owner: &UserId) -> Result<Vec<Playlist>>;

    /// A playlist with its tracks
    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// Delete a playlist; refuses the default playlist with `InvalidInput`
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()>;

    // ========================================================================
    // Playlist tracks
    // ========================================================================

    /// Append a track; a no-op when the track is already present
    async fn add_track(&self, playlist_id: &PlaylistId, track: &Track) -> Result<()>;

    /// Remove a track by id; a no-op when absent
    async fn remove_track(&self, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<()>;

    // ========================================================================
    // Liked songs
    // ========================================================================

    /// The owner's default playlist, created if missing
    async fn liked_songs(&self, owner: &UserId) -> Result<Playlist>;

    /// Flip a track's membership in the owner's liked songs
    ///
    /// Returns the new state: `true` when the track is now liked.
    async fn toggle_liked(&self, owner: &UserId, track: &Track) -> Result<bool>;

    /// Whether the track is in the owner's liked songs
    async fn is_liked(&self, owner: &UserId, track_id: &TrackId) -> Result<bool>;
}

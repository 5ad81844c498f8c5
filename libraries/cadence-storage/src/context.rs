use crate::playlists;
use async_trait::async_trait;
use cadence_core::{
    CreatePlaylist, Playlist, PlaylistId, PlaylistStore, Result, Track, TrackId, UserId,
};
use sqlx::SqlitePool;

/// Playlist store backed by `SQLite`
#[derive(Debug, Clone)]
pub struct SqlitePlaylistStore {
    pool: SqlitePool,
}

impl SqlitePlaylistStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PlaylistStore for SqlitePlaylistStore {
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<PlaylistId> {
        Ok(playlists::create(&self.pool, playlist).await?.id)
    }

    async fn list_playlists(&self, owner: &UserId) -> Result<Vec<Playlist>> {
        playlists::ensure_default(&self.pool, owner).await?;
        playlists::list_for_owner(&self.pool, owner).await
    }

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        playlists::delete(&self.pool, id).await
    }

    async fn add_track(&self, playlist_id: &PlaylistId, track: &Track) -> Result<()> {
        playlists::add_track(&self.pool, playlist_id, track).await?;
        Ok(())
    }

    async fn remove_track(&self, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<()> {
        playlists::remove_track(&self.pool, playlist_id, track_id).await?;
        Ok(())
    }

    async fn liked_songs(&self, owner: &UserId) -> Result<Playlist> {
        playlists::ensure_default(&self.pool, owner).await
    }

    async fn toggle_liked(&self, owner: &UserId, track: &Track) -> Result<bool> {
        let liked = playlists::ensure_default(&self.pool, owner).await?;

        if playlists::remove_track(&self.pool, &liked.id, &track.id).await? {
            Ok(false)
        } else {
            playlists::add_track(&self.pool, &liked.id, track).await
        }
    }

    async fn is_liked(&self, owner: &UserId, track_id: &TrackId) -> Result<bool> {
        playlists::contains_track(&self.pool, &PlaylistId::liked_for(owner), track_id).await
    }
}

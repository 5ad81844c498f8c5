/// Playlist domain types
use crate::types::{PlaylistId, Track, TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the playlist every user gets on first access
pub const LIKED_SONGS_NAME: &str = "Liked Songs";

/// An ordered, user-owned collection of tracks
///
/// A track id appears at most once; stores treat re-adding as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// Owner user ID
    pub owner_id: UserId,

    /// Tracks in playback order
    pub tracks: Vec<Track>,

    /// The owner's "Liked Songs" playlist
    pub is_default: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification (track added/removed)
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new, empty playlist
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            owner_id,
            tracks: Vec::new(),
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the playlist holds a track with this id
    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.position_of(track_id).is_some()
    }

    /// Position of the first track with this id
    pub fn position_of(&self, track_id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == track_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Data for creating a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylist {
    pub owner_id: UserId,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    /// Initial tracks, duplicates collapsed to their first occurrence
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl CreatePlaylist {
    /// A regular (non-default) playlist
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            is_default: false,
            tracks: Vec::new(),
        }
    }

    /// The owner's default "Liked Songs" playlist
    pub fn liked_songs(owner_id: UserId) -> Self {
        Self {
            owner_id,
            name: LIKED_SONGS_NAME.to_string(),
            is_default: true,
            tracks: Vec::new(),
        }
    }

    /// Seed the playlist with tracks
    #[must_use]
    pub fn with_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.tracks = tracks;
        self
    }
}

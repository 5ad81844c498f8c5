//! Domain types

mod ids;
mod playlist;
mod track;

pub use ids::{PlaylistId, TrackId, UserId};
pub use playlist::{CreatePlaylist, Playlist, LIKED_SONGS_NAME};
pub use track::Track;

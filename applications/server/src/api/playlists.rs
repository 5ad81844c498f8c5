/// Library API routes - playlists and liked songs
use crate::{
    api::songs::DataResponse,
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cadence_core::{CreatePlaylist, Playlist, PlaylistId, Track, TrackId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Songs kept from a smart playlist search
pub const SMART_PLAYLIST_SIZE: usize = 7;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub songs: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct SmartPlaylistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SongRequest {
    pub song: Track,
}

#[derive(Debug, Serialize)]
pub struct LikedStatus {
    pub liked: bool,
}

/// GET /api/library/playlists
/// The user's playlists, "Liked Songs" first
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<DataResponse<Vec<Playlist>>>> {
    let playlists = app_state.playlists.list_playlists(auth.user_id()).await?;
    Ok(Json(DataResponse { data: playlists }))
}

/// POST /api/library/playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<DataResponse<Playlist>>)> {
    let name = required_name(&req.name)?;
    let create = CreatePlaylist::new(auth.user_id().clone(), name).with_tracks(req.songs);

    let playlist = create_and_fetch(&app_state, create).await?;
    tracing::info!(playlist_id = %playlist.id, user = %auth.user_id(), "Playlist created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: playlist })))
}

/// POST /api/library/playlists/smart
/// Create a playlist from the top catalog results for a query
pub async fn create_smart_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<SmartPlaylistRequest>,
) -> Result<(StatusCode, Json<DataResponse<Playlist>>)> {
    let name = required_name(&req.name)?;
    let query = req.query.trim();
    if query.is_empty() {
        return Err(ServerError::BadRequest(
            "Search query is required".to_string(),
        ));
    }

    let mut songs = app_state
        .catalog
        .search_songs(query)
        .await
        .map_err(ServerError::upstream("Failed to search songs"))?;
    songs.truncate(SMART_PLAYLIST_SIZE);

    if songs.is_empty() {
        return Err(ServerError::NotFound(
            "No songs found for your search".to_string(),
        ));
    }

    let create = CreatePlaylist::new(auth.user_id().clone(), name).with_tracks(songs);
    let playlist = create_and_fetch(&app_state, create).await?;
    tracing::info!(
        playlist_id = %playlist.id,
        query,
        tracks = playlist.len(),
        "Smart playlist created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: playlist })))
}

/// GET /api/library/playlists/:id
pub async fn get_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Playlist>>> {
    let playlist = owned_playlist(&app_state, &auth, id).await?;
    Ok(Json(DataResponse { data: playlist }))
}

/// DELETE /api/library/playlists/:id
pub async fn delete_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let playlist = owned_playlist(&app_state, &auth, id).await?;
    app_state.playlists.delete_playlist(&playlist.id).await?;

    Ok(Json(json!({ "message": "Playlist deleted" })))
}

/// POST /api/library/playlists/:id/songs
pub async fn add_song(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    Json(req): Json<SongRequest>,
) -> Result<Json<Value>> {
    let playlist = owned_playlist(&app_state, &auth, id).await?;
    app_state.playlists.add_track(&playlist.id, &req.song).await?;

    Ok(Json(json!({ "message": "Song added to playlist" })))
}

/// DELETE /api/library/playlists/:id/songs/:song_id
pub async fn remove_song(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path((id, song_id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let playlist = owned_playlist(&app_state, &auth, id).await?;
    app_state
        .playlists
        .remove_track(&playlist.id, &TrackId::new(song_id))
        .await?;

    Ok(Json(json!({ "message": "Song removed from playlist" })))
}

/// GET /api/library/liked
pub async fn liked_songs(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<DataResponse<Playlist>>> {
    let liked = app_state.playlists.liked_songs(auth.user_id()).await?;
    Ok(Json(DataResponse { data: liked }))
}

/// GET /api/library/liked/:song_id
pub async fn liked_status(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(song_id): Path<String>,
) -> Result<Json<DataResponse<LikedStatus>>> {
    let liked = app_state
        .playlists
        .is_liked(auth.user_id(), &TrackId::new(song_id))
        .await?;
    Ok(Json(DataResponse {
        data: LikedStatus { liked },
    }))
}

/// POST /api/library/liked/toggle
pub async fn toggle_liked(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<SongRequest>,
) -> Result<Json<DataResponse<LikedStatus>>> {
    let liked = app_state
        .playlists
        .toggle_liked(auth.user_id(), &req.song)
        .await?;

    tracing::debug!(song_id = %req.song.id, liked, "Toggled liked song");
    Ok(Json(DataResponse {
        data: LikedStatus { liked },
    }))
}

fn required_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest(
            "Playlist name is required".to_string(),
        ));
    }
    Ok(name)
}

async fn create_and_fetch(app_state: &AppState, create: CreatePlaylist) -> Result<Playlist> {
    let id = app_state.playlists.create_playlist(create).await?;
    app_state
        .playlists
        .get_playlist(&id)
        .await?
        .ok_or_else(|| ServerError::Internal(format!("Created playlist {} vanished", id)))
}

/// Load a playlist, refusing anyone but its owner
async fn owned_playlist(
    app_state: &AppState,
    auth: &AuthenticatedUser,
    id: String,
) -> Result<Playlist> {
    let playlist = app_state
        .playlists
        .get_playlist(&PlaylistId::new(id))
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

    if &playlist.owner_id != auth.user_id() {
        return Err(ServerError::Forbidden(
            "You do not have access to this playlist".to_string(),
        ));
    }

    Ok(playlist)
}

/// Catalog proxy API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use cadence_core::{Track, TrackId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub results: Vec<Track>,
}

/// `{ "data": ... }` envelope shared by every catalog route
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// GET /api/search/songs?query=
///
/// Upstream failures become a 500 with a fixed message; the cause is logged.
pub async fn search_songs(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<DataResponse<SearchResults>>> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Search query is required".to_string()))?;

    let results = app_state
        .catalog
        .search_songs(query)
        .await
        .map_err(ServerError::upstream("Failed to search songs"))?;

    Ok(Json(DataResponse {
        data: SearchResults { results },
    }))
}

/// GET /api/songs/:id
pub async fn get_song(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Vec<Track>>>> {
    let track = app_state
        .catalog
        .get_song(&TrackId::new(id))
        .await
        .map_err(ServerError::upstream("Failed to get song details"))?
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;

    Ok(Json(DataResponse { data: vec![track] }))
}

/// GET /api/trending/songs
pub async fn trending_songs(
    State(app_state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Track>>>> {
    let tracks = app_state
        .catalog
        .trending_songs()
        .await
        .map_err(ServerError::upstream("Failed to get recommended songs"))?;

    Ok(Json(DataResponse { data: tracks }))
}

/// GET /api/playlists/top
pub async fn top_playlists(
    State(app_state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Track>>>> {
    let tracks = app_state
        .catalog
        .top_playlists()
        .await
        .map_err(ServerError::upstream("Failed to get top charts"))?;

    Ok(Json(DataResponse { data: tracks }))
}

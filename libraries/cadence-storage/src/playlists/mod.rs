//! Playlists vertical slice
//!
//! Free functions over a pool. Ownership checks are the caller's business;
//! these queries only enforce the playlist invariants (one default per owner,
//! unique track ids, dense positions).

use cadence_core::{
    CadenceError, CreatePlaylist, Playlist, PlaylistId, Result, Track, TrackId, UserId,
};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use std::collections::HashSet;
use tracing::{debug, info};

/// Create a playlist, seeding it with the given tracks
///
/// Default playlists always get the owner's well-known id; asking for a
/// second one fails with `Duplicate`.
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let id = if playlist.is_default {
        PlaylistId::liked_for(&playlist.owner_id)
    } else {
        PlaylistId::generate()
    };
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO playlists (id, owner_id, name, is_default, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.as_str())
    .bind(playlist.owner_id.as_str())
    .bind(&playlist.name)
    .bind(playlist.is_default)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| duplicate_default(e, &playlist.owner_id))?;

    let mut seen = HashSet::new();
    let unique = playlist.tracks.iter().filter(|t| seen.insert(&t.id));
    for (position, track) in unique.enumerate() {
        insert_track(&mut tx, &id, track, position as i64, now).await?;
    }

    tx.commit().await?;

    debug!(playlist_id = %id, owner = %playlist.owner_id, "Playlist created");

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| CadenceError::storage("Failed to retrieve created playlist"))
}

/// Get a playlist with its tracks
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        r#"
        SELECT id, owner_id, name, is_default, created_at, updated_at
        FROM playlists
        WHERE id = ?
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut playlist = playlist_from_row(&row);
    playlist.tracks = tracks_for(pool, id).await?;
    Ok(Some(playlist))
}

/// All of an owner's playlists with tracks, default first, then in creation order
pub async fn list_for_owner(pool: &SqlitePool, owner: &UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        r#"
        SELECT id, owner_id, name, is_default, created_at, updated_at
        FROM playlists
        WHERE owner_id = ?
        ORDER BY is_default DESC, rowid ASC
        "#,
    )
    .bind(owner.as_str())
    .fetch_all(pool)
    .await?;

    let mut playlists = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut playlist = playlist_from_row(row);
        playlist.tracks = tracks_for(pool, &playlist.id).await?;
        playlists.push(playlist);
    }
    Ok(playlists)
}

/// The owner's default playlist, created on first use
pub async fn ensure_default(pool: &SqlitePool, owner: &UserId) -> Result<Playlist> {
    let id = PlaylistId::liked_for(owner);
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO playlists (id, owner_id, name, is_default, created_at, updated_at)
        VALUES (?, ?, ?, 1, ?, ?)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(id.as_str())
    .bind(owner.as_str())
    .bind(cadence_core::LIKED_SONGS_NAME)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        info!(owner = %owner, "Default playlist created");
    }

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| CadenceError::not_found("Playlist", id.as_str()))
}

/// Append a track
///
/// Returns `false` when the track was already in the playlist.
pub async fn add_track(pool: &SqlitePool, id: &PlaylistId, track: &Track) -> Result<bool> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;
    ensure_exists(&mut tx, id).await?;

    let next_position: i64 = sqlx::query(
        "SELECT COALESCE(MAX(position) + 1, 0) AS next_pos FROM playlist_tracks WHERE playlist_id = ?",
    )
    .bind(id.as_str())
    .fetch_one(&mut *tx)
    .await?
    .get("next_pos");

    let inserted = insert_track(&mut tx, id, track, next_position, now).await?;
    if inserted {
        touch(&mut tx, id, now).await?;
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Remove a track and close the gap it leaves
///
/// Returns `false` when the track was not in the playlist.
pub async fn remove_track(pool: &SqlitePool, id: &PlaylistId, track_id: &TrackId) -> Result<bool> {
    let mut tx = pool.begin().await?;
    ensure_exists(&mut tx, id).await?;

    let position: Option<i64> = sqlx::query(
        "SELECT position FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?",
    )
    .bind(id.as_str())
    .bind(track_id.as_str())
    .fetch_optional(&mut *tx)
    .await?
    .map(|row| row.get("position"));

    let Some(position) = position else {
        return Ok(false);
    };

    sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?")
        .bind(id.as_str())
        .bind(track_id.as_str())
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "UPDATE playlist_tracks SET position = position - 1 WHERE playlist_id = ? AND position > ?",
    )
    .bind(id.as_str())
    .bind(position)
    .execute(&mut *tx)
    .await?;

    touch(&mut tx, id, Utc::now()).await?;
    tx.commit().await?;
    Ok(true)
}

/// Delete a playlist and its tracks
///
/// The default playlist cannot be deleted.
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let is_default: Option<bool> = sqlx::query("SELECT is_default FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(&mut *tx)
        .await?
        .map(|row| row.get::<i64, _>("is_default") != 0);

    match is_default {
        None => return Err(CadenceError::not_found("Playlist", id.as_str())),
        Some(true) => {
            return Err(CadenceError::invalid_input(
                "The default playlist cannot be deleted",
            ))
        }
        Some(false) => {}
    }

    sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    debug!(playlist_id = %id, "Playlist deleted");
    Ok(())
}

/// Whether the playlist holds the track
pub async fn contains_track(pool: &SqlitePool, id: &PlaylistId, track_id: &TrackId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?")
        .bind(id.as_str())
        .bind(track_id.as_str())
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

async fn tracks_for(pool: &SqlitePool, id: &PlaylistId) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        r#"
        SELECT track_id, title, artist, stream_url, thumbnail, duration_secs,
               album, year, language, perma_url
        FROM playlist_tracks
        WHERE playlist_id = ?
        ORDER BY position
        "#,
    )
    .bind(id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(track_from_row).collect())
}

/// Returns `false` when the track id is already present
async fn insert_track(
    tx: &mut Transaction<'_, Sqlite>,
    id: &PlaylistId,
    track: &Track,
    position: i64,
    added_at: DateTime<Utc>,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO playlist_tracks (
            playlist_id, track_id, position, title, artist, stream_url, thumbnail,
            duration_secs, album, year, language, perma_url, added_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(playlist_id, track_id) DO NOTHING
        "#,
    )
    .bind(id.as_str())
    .bind(track.id.as_str())
    .bind(position)
    .bind(&track.title)
    .bind(&track.artist)
    .bind(&track.stream_url)
    .bind(&track.thumbnail)
    .bind(track.duration_secs.map(i64::from))
    .bind(&track.album)
    .bind(&track.year)
    .bind(&track.language)
    .bind(&track.perma_url)
    .bind(added_at)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn ensure_exists(tx: &mut Transaction<'_, Sqlite>, id: &PlaylistId) -> Result<()> {
    sqlx::query("SELECT 1 FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(&mut **tx)
        .await?
        .map(|_| ())
        .ok_or_else(|| CadenceError::not_found("Playlist", id.as_str()))
}

async fn touch(tx: &mut Transaction<'_, Sqlite>, id: &PlaylistId, now: DateTime<Utc>) -> Result<()> {
    sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id.as_str())
        .execute(&mut **tx)
        .await?;
    Ok(())
}

fn duplicate_default(err: sqlx::Error, owner: &UserId) -> CadenceError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            CadenceError::duplicate(format!("User {} already has a default playlist", owner))
        }
        _ => err.into(),
    }
}

fn playlist_from_row(row: &SqliteRow) -> Playlist {
    Playlist {
        id: PlaylistId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        owner_id: UserId::new(row.get::<String, _>("owner_id")),
        tracks: Vec::new(),
        is_default: row.get::<i64, _>("is_default") != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn track_from_row(row: &SqliteRow) -> Track {
    Track {
        id: TrackId::new(row.get::<String, _>("track_id")),
        title: row.get("title"),
        artist: row.get("artist"),
        stream_url: row.get("stream_url"),
        thumbnail: row.get("thumbnail"),
        duration_secs: row
            .get::<Option<i64>, _>("duration_secs")
            .and_then(|d| u32::try_from(d).ok()),
        album: row.get("album"),
        year: row.get("year"),
        language: row.get("language"),
        perma_url: row.get("perma_url"),
    }
}

//! Tests for `SqlitePlaylistStore` through the `PlaylistStore` trait


use cadence_core::{CreatePlaylist, PlaylistStore, TrackId, UserId};
use cadence_storage::SqlitePlaylistStore;
use std::sync::Arc;
use test_helpers::*;

fn store_for(db: &TestDb) -> Arc<dyn PlaylistStore> {
    Arc::new(SqlitePlaylistStore::new(db.pool.clone()))
}

#[tokio::test]
async fn test_list_creates_default_on_first_access() {
    let db = TestDb::new().await;
    let store = store_for(&db);
    let owner = UserId::new("newcomer");

    let playlists = store.list_playlists(&owner).await.unwrap();

    assert_eq!(playlists.len(), 1);
    assert!(playlists[0].is_default);
    assert!(playlists[0].is_empty());
}

#[tokio::test]
async fn test_create_then_list() {
    let db = TestDb::new().await;
    let store = store_for(&db);
    let owner = UserId::new("alice");

    let id = store
        .create_playlist(CreatePlaylist::new(owner.clone(), "Focus").with_tracks(vec![test_track("a")]))
        .await
        .unwrap();

    let playlists = store.list_playlists(&owner).await.unwrap();
    assert_eq!(playlists.len(), 2);
    assert!(playlists[0].is_default);
    assert_eq!(playlists[1].id, id);
    assert_eq!(track_ids(&playlists[1]), vec!["a"]);
}

#[tokio::test]
async fn test_toggle_liked_round_trip() {
    let db = TestDb::new().await;
    let store = store_for(&db);
    let owner = UserId::new("alice");
    let track = test_track("fav");

    assert!(!store.is_liked(&owner, &track.id).await.unwrap());

    assert!(store.toggle_liked(&owner, &track).await.unwrap());
    assert!(store.is_liked(&owner, &track.id).await.unwrap());
    assert_eq!(track_ids(&store.liked_songs(&owner).await.unwrap()), vec!["fav"]);

    assert!(!store.toggle_liked(&owner, &track).await.unwrap());
    assert!(!store.is_liked(&owner, &track.id).await.unwrap());
    assert!(store.liked_songs(&owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_likes_are_per_user() {
    let db = TestDb::new().await;
    let store = store_for(&db);
    let alice = UserId::new("alice");
    let bob = UserId::new("bob");

    store.toggle_liked(&alice, &test_track("x")).await.unwrap();

    assert!(store.is_liked(&alice, &TrackId::new("x")).await.unwrap());
    assert!(!store.is_liked(&bob, &TrackId::new("x")).await.unwrap());
}

#[tokio::test]
async fn test_add_and_remove_through_trait() {
    let db = TestDb::new().await;
    let store = store_for(&db);
    let owner = UserId::new("alice");
    let id = store
        .create_playlist(CreatePlaylist::new(owner, "Queue"))
        .await
        .unwrap();

    store.add_track(&id, &test_track("a")).await.unwrap();
    store.add_track(&id, &test_track("a")).await.unwrap();
    store.add_track(&id, &test_track("b")).await.unwrap();
    store.remove_track(&id, &TrackId::new("a")).await.unwrap();
    store.remove_track(&id, &TrackId::new("missing")).await.unwrap();

    let playlist = store.get_playlist(&id).await.unwrap().unwrap();
    assert_eq!(track_ids(&playlist), vec!["b"]);

    store.delete_playlist(&id).await.unwrap();
    assert!(store.get_playlist(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("cadence.db").display());
    let owner = UserId::new("alice");

    {
        let pool = cadence_storage::create_pool(&url).await.unwrap();
        cadence_storage::run_migrations(&pool).await.unwrap();
        let store = SqlitePlaylistStore::new(pool.clone());
        store.toggle_liked(&owner, &test_track("keep")).await.unwrap();
        pool.close().await;
    }

    let pool = cadence_storage::create_pool(&url).await.unwrap();
    cadence_storage::run_migrations(&pool).await.unwrap();
    let store = SqlitePlaylistStore::new(pool);

    assert!(store.is_liked(&owner, &TrackId::new("keep")).await.unwrap());
}

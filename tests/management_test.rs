mod common;

use common::*;
use migratify::{
    SyncError,
    client::TokenStore,
    management::{
        ApplyReportManager, FileTokenStore, LibraryManager, SearchRecordManager, Stage,
        StateManager, WORK_SET_FILE, WorkSetManager,
    },
    reconcile::SearchQuery,
    types::{ApplyReport, ManualItem, SearchRecord, SearchResult, SourceLibrary, WorkSet},
};
use tempfile::tempdir;

#[tokio::test]
async fn token_store_round_trips_and_invalidates() {
    let dir = tempdir().unwrap();
    let store = FileTokenStore::new(dir.path(), "spotify");

    assert_eq!(store.load().await.unwrap(), None);

    let token = fresh_token("abc");
    store.save(&token).await.unwrap();
    assert!(store.path().ends_with("tokens/spotify.json"));
    assert_eq!(store.load().await.unwrap(), Some(token));

    store.invalidate().await.unwrap();
    assert_eq!(store.load().await.unwrap(), None);
    // invalidating twice is fine
    store.invalidate().await.unwrap();
}

#[tokio::test]
async fn stages_advance_with_their_snapshots() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let state = StateManager::new(root);

    assert_eq!(state.current().await, Stage::Unauthenticated);

    FileTokenStore::new(root, "deezer")
        .save(&fresh_token("dz"))
        .await
        .unwrap();
    assert_eq!(state.current().await, Stage::Unauthenticated);

    FileTokenStore::new(root, "spotify")
        .save(&fresh_token("sp"))
        .await
        .unwrap();
    assert_eq!(state.current().await, Stage::Authenticated);

    LibraryManager::new(root, SourceLibrary::default())
        .persist()
        .await
        .unwrap();
    assert_eq!(state.current().await, Stage::Enumerated);
    assert!(state.require(Stage::Enumerated).await.is_ok());
}

#[tokio::test]
async fn skipped_stage_is_reported() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    // a work set without any earlier snapshot does not count
    WorkSetManager::new(root, WorkSet::default())
        .persist()
        .await
        .unwrap();
    assert!(root.join(WORK_SET_FILE).is_file());

    let err = StateManager::new(root)
        .require(Stage::Resolved)
        .await
        .unwrap_err();

    match err {
        SyncError::StageNotReached {
            required,
            current,
            command,
        } => {
            assert_eq!(required, Stage::Resolved);
            assert_eq!(current, Stage::Unauthenticated);
            assert_eq!(command, "resolve");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn search_records_keep_the_first_entry_per_key() {
    let dir = tempdir().unwrap();
    let mut records = SearchRecordManager::new(dir.path());
    let artist = source_artist(1, "Band");
    let first = SearchRecord::new(
        1,
        SearchQuery::for_artist(&artist),
        artist_result(vec![dest_artist("a", "Band")]),
    );
    let second = SearchRecord::new(1, SearchQuery::for_artist(&artist), SearchResult::default());

    assert!(records.insert(first));
    assert!(!records.insert(second));
    records.persist().await.unwrap();

    let loaded = SearchRecordManager::load(dir.path()).await.unwrap();
    assert_eq!(loaded.len(), 1);
    let record = loaded.index().values().next().unwrap();
    assert_eq!(record.result.total(record.entity_kind), 1);
}

#[tokio::test]
async fn work_set_snapshot_uses_camel_case_fields() {
    let dir = tempdir().unwrap();
    let work = WorkSet {
        manual_tracks: vec![ManualItem {
            query: "track:Song".to_string(),
            candidates: Vec::new(),
        }],
        ..WorkSet::default()
    };
    let manager = WorkSetManager::new(dir.path(), work.clone());
    manager.persist().await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join(WORK_SET_FILE)).unwrap();
    assert!(raw.contains("\"manualTracks\""));
    assert!(raw.contains("\"manualPlaylists\""));
    assert_eq!(WorkSetManager::load(dir.path()).await.unwrap().work(), &work);
    assert_eq!(manager.count_manual(), 1);
}

#[tokio::test]
async fn apply_report_is_reloaded_after_apply() {
    let dir = tempdir().unwrap();
    let state = StateManager::new(dir.path());
    assert!(!state.reached(Stage::Applied).await);

    let report = ApplyReport {
        artists_followed: 2,
        playlist_tracks_added: 7,
        playlist_tracks_skipped: 1,
        ..ApplyReport::default()
    };
    ApplyReportManager::persist(dir.path(), &report).await.unwrap();

    assert!(state.reached(Stage::Applied).await);
    assert_eq!(ApplyReportManager::load(dir.path()).await.unwrap(), report);
}

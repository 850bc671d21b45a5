mod common;

use common::*;
use indicatif::ProgressBar;
use migratify::{
    SyncError,
    management::SearchRecordManager,
    reconcile::{DiagnosticKind, Resolver, workset},
    sync::{run_search_stage, search_library},
    types::{EntityKind, Favourites, PlaylistSnapshot, SourceLibrary},
};
use tempfile::tempdir;

fn library() -> SourceLibrary {
    SourceLibrary {
        favourites: Favourites {
            artists: vec![source_artist(1, "Band")],
            albums: vec![source_album(1, "Record", "Band")],
            tracks: vec![source_track(1, "One", "Band", "Record")],
        },
        playlists: vec![
            PlaylistSnapshot {
                name: "Mix".to_string(),
                public: false,
                source_tracks: vec![
                    source_track(2, "Two", "Band", "Record"),
                    source_track(1, "One", "Band", "Record"),
                ],
            },
            PlaylistSnapshot {
                name: "Loved Tracks".to_string(),
                public: false,
                source_tracks: vec![source_track(3, "Three", "Band", "Record")],
            },
        ],
    }
}

#[tokio::test]
async fn every_entity_is_searched_once_in_stage_order() {
    let dir = tempdir().unwrap();
    let mut records = SearchRecordManager::new(dir.path());
    let mut search = FakeSearch::default()
        .answer(
            "track:One artist:Band album:Record",
            track_result(vec![dest_track("t1", "One", "Band", "Record")]),
        )
        .answer(
            "track:Two artist:Band album:Record",
            track_result(vec![dest_track("t2", "Two", "Band", "Record")]),
        )
        .answer("artist:Band", artist_result(vec![dest_artist("a1", "Band")]))
        .answer(
            "album:Record artist:Band",
            album_result(vec![dest_album("r1", "Record", "Band")]),
        );

    let searched = search_library(&mut search, &library(), &mut records, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(searched, 4);
    assert_eq!(
        search.queries,
        vec![
            "track:One artist:Band album:Record",
            "artist:Band",
            "album:Record artist:Band",
            "track:Two artist:Band album:Record",
        ]
    );
    // an artist and an album sharing id 1 keep separate records
    assert!(records.contains(EntityKind::Artist, 1));
    assert!(records.contains(EntityKind::Album, 1));
    assert!(!records.contains(EntityKind::Track, 3));
}

#[tokio::test]
async fn track_fallback_keeps_the_first_query_with_hits() {
    let dir = tempdir().unwrap();
    let mut records = SearchRecordManager::new(dir.path());
    let library = SourceLibrary {
        favourites: Favourites {
            tracks: vec![source_track(7, "Song", "Band", "Deluxe Edition")],
            ..Favourites::default()
        },
        playlists: Vec::new(),
    };
    let mut search = FakeSearch::default().answer(
        "track:Song artist:Band",
        track_result(vec![dest_track("t7", "Song", "Band", "Record")]),
    );

    search_library(&mut search, &library, &mut records, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(search.queries.len(), 2);
    let record = records.get(EntityKind::Track, 7).unwrap();
    assert_eq!(record.query.to_search_string(), "track:Song artist:Band");
    assert_eq!(record.result.total(EntityKind::Track), 1);
}

#[tokio::test]
async fn exhausted_fallback_keeps_the_last_attempt() {
    let dir = tempdir().unwrap();
    let mut records = SearchRecordManager::new(dir.path());
    let library = SourceLibrary {
        favourites: Favourites {
            tracks: vec![source_track(8, "Rare", "Band", "Record")],
            ..Favourites::default()
        },
        playlists: Vec::new(),
    };
    let mut search = FakeSearch::default();

    search_library(&mut search, &library, &mut records, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(search.queries.len(), 3);
    let record = records.get(EntityKind::Track, 8).unwrap();
    assert_eq!(record.query.to_search_string(), "track:Rare");
    assert_eq!(
        record.initial_query().to_search_string(),
        "track:Rare artist:Band album:Record"
    );
}

#[tokio::test]
async fn allow_listed_album_survives_an_exhausted_fallback() {
    let dir = tempdir().unwrap();
    let mut records = SearchRecordManager::new(dir.path());
    let library = SourceLibrary {
        favourites: Favourites {
            tracks: vec![source_track(9, "Spring 1", "Max Richter", "Vivaldi Recomposed")],
            ..Favourites::default()
        },
        playlists: vec![PlaylistSnapshot {
            name: "Strings".to_string(),
            public: false,
            source_tracks: vec![source_track(9, "Spring 1", "Max Richter", "Vivaldi Recomposed")],
        }],
    };
    let mut search = FakeSearch::default();

    search_library(&mut search, &library, &mut records, &ProgressBar::hidden())
        .await
        .unwrap();
    assert_eq!(
        search.queries,
        vec![
            "track:Spring 1 artist:Max Richter album:Vivaldi Recomposed",
            "track:Spring 1 artist:Max Richter",
            "track:Spring 1",
        ]
    );

    let mut resolver = Resolver::default();
    let work = workset::build(&library, records.index(), &mut resolver).unwrap();

    assert!(work.tracks.is_empty());
    assert!(work.manual_tracks.is_empty());
    assert!(work.manual_playlists.is_empty());
    assert!(
        resolver
            .diagnostics()
            .iter()
            .all(|d| d.kind == DiagnosticKind::Ignored)
    );
}

#[tokio::test]
async fn manual_item_shows_the_full_query_after_fallback() {
    let dir = tempdir().unwrap();
    let mut records = SearchRecordManager::new(dir.path());
    let library = SourceLibrary {
        favourites: Favourites {
            tracks: vec![source_track(10, "Rare", "Band", "Record")],
            ..Favourites::default()
        },
        playlists: Vec::new(),
    };

    search_library(&mut FakeSearch::default(), &library, &mut records, &ProgressBar::hidden())
        .await
        .unwrap();
    let work = workset::build(&library, records.index(), &mut Resolver::default()).unwrap();

    assert_eq!(work.manual_tracks.len(), 1);
    assert_eq!(work.manual_tracks[0].query, "track:Rare artist:Band album:Record");
}

#[tokio::test]
async fn failed_run_flushes_partial_records_and_resumes() {
    let dir = tempdir().unwrap();
    let library = SourceLibrary {
        favourites: Favourites {
            artists: vec![
                source_artist(1, "A"),
                source_artist(2, "B"),
                source_artist(3, "C"),
            ],
            ..Favourites::default()
        },
        playlists: Vec::new(),
    };

    let mut records = SearchRecordManager::new(dir.path());
    let mut failing = FakeSearch {
        fail_after: Some(2),
        ..FakeSearch::default()
    };
    let err = run_search_stage(&mut failing, &library, &mut records, &ProgressBar::hidden())
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::TransientServer { .. }));

    let mut resumed = SearchRecordManager::load_or_default(dir.path()).await.unwrap();
    assert_eq!(resumed.len(), 2);

    let mut search = FakeSearch::default();
    let searched = run_search_stage(&mut search, &library, &mut resumed, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(searched, 1);
    assert_eq!(search.queries, vec!["artist:C"]);
    assert_eq!(
        SearchRecordManager::load(dir.path()).await.unwrap().len(),
        3
    );
}

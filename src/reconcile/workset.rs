use std::collections::BTreeMap;

use crate::{
    Res, SyncError,
    reconcile::{IdForm, Resolution, Resolver},
    types::{
        EntityKind, ManualItem, ManualPlaylist, PlaylistWork, SearchRecord, SourceLibrary, WorkSet,
    },
};

/// Title of the source's built-in favourites playlist.
pub const LOVED_TRACKS: &str = "Loved Tracks";

pub fn is_loved_tracks(name: &str) -> bool {
    name == LOVED_TRACKS
}

/// Search records keyed by `(entity kind, source id)`.
pub type RecordIndex = BTreeMap<(EntityKind, u64), SearchRecord>;

fn record<'r>(records: &'r RecordIndex, kind: EntityKind, id: u64) -> Res<&'r SearchRecord> {
    records
        .get(&(kind, id))
        .ok_or(SyncError::MissingSearchRecord { id, kind })
}

fn dispatch(resolution: Resolution, apply: &mut Vec<String>, manual: &mut Vec<ManualItem>) {
    match resolution {
        Resolution::Accepted(id) => apply.push(id),
        Resolution::Manual(item) => manual.push(item),
        Resolution::Ignored => {}
    }
}

/// Resolves every source entity into the apply and manual halves of a
/// [`WorkSet`].
///
/// Fails when an entity has no search record; the search stage has to be
/// completed first.
pub fn build(
    library: &SourceLibrary,
    records: &RecordIndex,
    resolver: &mut Resolver,
) -> Res<WorkSet> {
    let mut work = WorkSet::default();
    let favourites = &library.favourites;

    for track in &favourites.tracks {
        let resolution =
            resolver.resolve(record(records, EntityKind::Track, track.id)?, IdForm::Id);
        dispatch(resolution, &mut work.tracks, &mut work.manual_tracks);
    }

    for album in &favourites.albums {
        let resolution =
            resolver.resolve(record(records, EntityKind::Album, album.id)?, IdForm::Id);
        dispatch(resolution, &mut work.albums, &mut work.manual_albums);
    }

    for artist in &favourites.artists {
        let resolution =
            resolver.resolve(record(records, EntityKind::Artist, artist.id)?, IdForm::Id);
        dispatch(resolution, &mut work.artists, &mut work.manual_artists);
    }

    for playlist in library.playlists.iter().filter(|p| !is_loved_tracks(&p.name)) {
        let mut tracks = Vec::new();
        let mut manual = Vec::new();
        for track in &playlist.source_tracks {
            let resolution =
                resolver.resolve(record(records, EntityKind::Track, track.id)?, IdForm::Uri);
            dispatch(resolution, &mut tracks, &mut manual);
        }

        work.playlists.push(PlaylistWork {
            name: playlist.name.clone(),
            public: playlist.public,
            tracks,
        });
        if !manual.is_empty() {
            work.manual_playlists.push(ManualPlaylist {
                name: playlist.name.clone(),
                tracks: manual,
            });
        }
    }

    Ok(work)
}

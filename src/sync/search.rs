use indicatif::ProgressBar;

use crate::{
    Res,
    management::SearchRecordManager,
    reconcile::{SearchQuery, is_loved_tracks},
    sync::CatalogSearch,
    types::{SearchRecord, SearchResult, SourceLibrary},
};

/// Every source entity with its initial query, in search order: favourite
/// tracks, artists, albums, then playlist tracks.
fn pending_queries(library: &SourceLibrary) -> Vec<(u64, SearchQuery)> {
    let favourites = &library.favourites;
    let tracks = favourites
        .tracks
        .iter()
        .map(|t| (t.id, SearchQuery::for_track(t)));
    let artists = favourites
        .artists
        .iter()
        .map(|a| (a.id, SearchQuery::for_artist(a)));
    let albums = favourites
        .albums
        .iter()
        .map(|a| (a.id, SearchQuery::for_album(a)));
    let playlist_tracks = library
        .playlists
        .iter()
        .filter(|p| !is_loved_tracks(&p.name))
        .flat_map(|p| p.source_tracks.iter())
        .map(|t| (t.id, SearchQuery::for_track(t)));

    tracks
        .chain(artists)
        .chain(albums)
        .chain(playlist_tracks)
        .collect()
}

/// Walks the fallback chain and keeps the first query with at least one hit,
/// or the last one tried.
async fn search_with_fallback<S: CatalogSearch + ?Sized>(
    search: &mut S,
    query: SearchQuery,
) -> Res<(SearchQuery, SearchResult)> {
    let mut last = None;
    for attempt in query.fallbacks() {
        let result = search.search(&attempt).await?;
        if result.total(attempt.kind) > 0 {
            return Ok((attempt, result));
        }
        last = Some((attempt, result));
    }
    Ok(last.unwrap_or((query, SearchResult::default())))
}

/// Searches every entity that has no record yet and adds the results to
/// `records`. Returns the number of new records.
pub async fn search_library<S: CatalogSearch + ?Sized>(
    search: &mut S,
    library: &SourceLibrary,
    records: &mut SearchRecordManager,
    progress: &ProgressBar,
) -> Res<usize> {
    let pending: Vec<(u64, SearchQuery)> = pending_queries(library)
        .into_iter()
        .filter(|(id, query)| !records.contains(query.kind, *id))
        .collect();
    progress.set_length(pending.len() as u64);

    let mut searched = 0;
    for (id, query) in pending {
        // the same track can sit in several playlists
        if records.contains(query.kind, id) {
            progress.inc(1);
            continue;
        }

        progress.set_message(query.to_search_string());
        let (attempt, result) = search_with_fallback(search, query.clone()).await?;
        records.insert(SearchRecord::new(id, attempt, result).with_original(query));
        searched += 1;
        progress.inc(1);
    }

    Ok(searched)
}

/// [`search_library`], with the accumulated records flushed to disk whether
/// or not the searches succeeded.
pub async fn run_search_stage<S: CatalogSearch + ?Sized>(
    search: &mut S,
    library: &SourceLibrary,
    records: &mut SearchRecordManager,
    progress: &ProgressBar,
) -> Res<usize> {
    let outcome = search_library(search, library, records, progress).await;
    records.persist().await?;
    outcome
}

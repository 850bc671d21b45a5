use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::reconcile::SearchQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Artist,
    Album,
    Track,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Artist => "artist",
            EntityKind::Album => "album",
            EntityKind::Track => "track",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached credential of one service.
///
/// `expires_in` is absent for tokens that never expire (Deezer issues those
/// when `offline_access` is granted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub obtained_at: i64,
}

impl Token {
    pub fn expires_at(&self) -> Option<i64> {
        self.expires_in.map(|secs| self.obtained_at + secs)
    }
}

// Source service (Deezer) schema.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceArtist {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAlbumRef {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAlbum {
    pub id: u64,
    pub title: String,
    pub artist: SourceArtist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTrack {
    pub id: u64,
    pub title: String,
    pub artist: SourceArtist,
    pub album: SourceAlbumRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcePlaylist {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub is_loved_track: bool,
    pub tracklist: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceApiError {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}

/// One page of an offset-paginated Deezer listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SourcePage<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub error: Option<SourceApiError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Favourites {
    pub artists: Vec<SourceArtist>,
    pub albums: Vec<SourceAlbum>,
    pub tracks: Vec<SourceTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnapshot {
    pub name: String,
    #[serde(default)]
    pub public: bool,
    pub source_tracks: Vec<SourceTrack>,
}

/// Everything the enumerator pulled out of the source account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceLibrary {
    pub favourites: Favourites,
    pub playlists: Vec<PlaylistSnapshot>,
}

// Destination service (Spotify) schema.

/// A link-paginated Spotify listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next: None,
            total: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestAlbum {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<DestArtist>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub album: DestAlbum,
    #[serde(default)]
    pub artists: Vec<DestArtist>,
}

/// Response of `GET /search`: one block per requested kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Page<DestArtist>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albums: Option<Page<DestAlbum>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Page<DestTrack>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestPlaylist {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemTrack {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<PlaylistItemTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveIdsRequest {
    pub ids: Vec<String>,
}

// Pipeline snapshots.

/// The durable unit of work between the search and resolve stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub source_entity_id: u64,
    pub entity_kind: EntityKind,
    /// The query whose result is stored, possibly a relaxed fallback.
    pub query: SearchQuery,
    /// The full query built from the source entity, when `query` is a
    /// fallback of it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_query: Option<SearchQuery>,
    pub result: SearchResult,
}

impl SearchRecord {
    pub fn new(source_entity_id: u64, query: SearchQuery, result: SearchResult) -> Self {
        Self {
            source_entity_id,
            entity_kind: query.kind,
            query,
            original_query: None,
            result,
        }
    }

    /// Records that `query` was reached by relaxing `original`.
    pub fn with_original(mut self, original: SearchQuery) -> Self {
        if original != self.query {
            self.original_query = Some(original);
        }
        self
    }

    /// The full query built from the source entity.
    pub fn initial_query(&self) -> &SearchQuery {
        self.original_query.as_ref().unwrap_or(&self.query)
    }

    pub fn key(&self) -> (EntityKind, u64) {
        (self.entity_kind, self.source_entity_id)
    }
}

/// A source entity that needs a human decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualItem {
    pub query: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistWork {
    pub name: String,
    #[serde(default)]
    pub public: bool,
    pub tracks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualPlaylist {
    pub name: String,
    pub tracks: Vec<ManualItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSet {
    pub artists: Vec<String>,
    pub albums: Vec<String>,
    pub tracks: Vec<String>,
    pub playlists: Vec<PlaylistWork>,
    pub manual_artists: Vec<ManualItem>,
    pub manual_albums: Vec<ManualItem>,
    pub manual_tracks: Vec<ManualItem>,
    pub manual_playlists: Vec<ManualPlaylist>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    pub artists_followed: usize,
    pub albums_saved: usize,
    pub tracks_saved: usize,
    pub playlists_created: usize,
    pub playlists_reused: usize,
    pub playlist_tracks_added: usize,
    pub playlist_tracks_skipped: usize,
}

#[derive(Tabled)]
pub struct ManualTableRow {
    pub query: String,
    pub candidates: String,
}

#[derive(Tabled)]
pub struct ManualPlaylistTableRow {
    pub name: String,
    pub tracks: usize,
}

/// What the local OAuth listener received from the consent redirect.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationCallback {
    pub code: Option<String>,
    pub error: Option<String>,
}

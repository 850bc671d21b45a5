//! # Search Stage and Sync Applier
//!
//! The two stages that talk to the destination service. Both are written
//! against the traits below so the destination can be swapped for a fake;
//! [`crate::spotify::SpotifyClient`] is the real implementation.

mod apply;
mod search;

use async_trait::async_trait;

pub use apply::{BatchLimits, SyncApplier};
pub use search::{run_search_stage, search_library};

use crate::{
    Res,
    reconcile::SearchQuery,
    types::{DestPlaylist, SearchResult},
};

#[async_trait]
pub trait CatalogSearch: Send {
    async fn search(&mut self, query: &SearchQuery) -> Res<SearchResult>;
}

/// Mutations the applier replays against the destination account.
#[async_trait]
pub trait DestinationCatalog: Send {
    async fn follow_artists(&mut self, ids: &[String]) -> Res<()>;
    async fn save_albums(&mut self, ids: &[String]) -> Res<()>;
    async fn save_tracks(&mut self, ids: &[String]) -> Res<()>;
    /// Playlists owned by the authenticated user.
    async fn own_playlists(&mut self) -> Res<Vec<DestPlaylist>>;
    async fn create_playlist(
        &mut self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Res<DestPlaylist>;
    /// URIs of every track currently in the playlist.
    async fn playlist_track_uris(&mut self, playlist_id: &str) -> Res<Vec<String>>;
    async fn add_playlist_tracks(&mut self, playlist_id: &str, uris: &[String]) -> Res<()>;
}

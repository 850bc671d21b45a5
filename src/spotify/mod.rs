//! # Spotify Integration Module
//!
//! The destination side of the migration. [`SpotifyClient`] wraps a
//! [`CatalogClient`] configured for bearer authentication and implements the
//! two seams the pipeline is written against:
//!
//! - [`CatalogSearch`](crate::sync::CatalogSearch) - `GET /search` for one
//!   entity kind at a time
//! - [`DestinationCatalog`] - follow, save and playlist operations replayed
//!   by the [`SyncApplier`](crate::sync::SyncApplier)
//!
//! ## API Coverage
//!
//! - `GET /search` - Catalog search with field filters
//! - `PUT /me/following?type=artist` - Follow artists
//! - `PUT /me/albums`, `PUT /me/tracks` - Save albums and tracks by id
//! - `GET /me` - Current user id, used to tell owned playlists apart
//! - `GET /me/playlists` - Playlists the user follows or owns
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `GET /playlists/{playlist_id}/tracks` - Current playlist contents
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks by URI
//!
//! ## Authentication
//!
//! [`auth::SpotifyAuthenticator`] runs the Authorization Code flow with PKCE,
//! so no client secret is stored. Tokens are cached by
//! [`FileTokenStore`] and refreshed by the client shortly before they expire.

pub mod auth;
mod library;
mod playlist;
mod search;

use std::path::Path;

use async_trait::async_trait;

use crate::{
    Res,
    client::{AuthPlacement, CatalogClient, ClientConfig, ReqwestTransport},
    config,
    management::FileTokenStore,
    sync::DestinationCatalog,
    types::DestPlaylist,
};

pub const SERVICE: &str = "spotify";

pub struct SpotifyClient {
    client: CatalogClient,
    api_url: String,
    user_id: Option<String>,
}

impl SpotifyClient {
    pub fn new(client: CatalogClient, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            user_id: None,
        }
    }

    /// Builds the production client: reqwest transport, PKCE authenticator
    /// and the token cached under `root`.
    pub fn from_env(root: &Path) -> Res<Self> {
        let client = CatalogClient::new(
            ClientConfig::new(SERVICE, AuthPlacement::Bearer)
                .with_gateway_retry_delay(config::gateway_retry_delay()),
            Box::new(ReqwestTransport::new()),
            Box::new(auth::SpotifyAuthenticator::from_env()?),
            Box::new(FileTokenStore::new(root, SERVICE)),
        );
        Ok(Self::new(client, config::spotify_apiurl()))
    }

    pub fn client_mut(&mut self) -> &mut CatalogClient {
        &mut self.client
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

#[async_trait]
impl DestinationCatalog for SpotifyClient {
    async fn follow_artists(&mut self, ids: &[String]) -> Res<()> {
        let url = self.endpoint("/me/following");
        self.save_ids(url, Some(("type", "artist")), ids).await
    }

    async fn save_albums(&mut self, ids: &[String]) -> Res<()> {
        let url = self.endpoint("/me/albums");
        self.save_ids(url, None, ids).await
    }

    async fn save_tracks(&mut self, ids: &[String]) -> Res<()> {
        let url = self.endpoint("/me/tracks");
        self.save_ids(url, None, ids).await
    }

    async fn own_playlists(&mut self) -> Res<Vec<DestPlaylist>> {
        let user_id = self.current_user_id().await?;
        let playlists = self.followed_playlists().await?;
        Ok(playlists
            .into_iter()
            .filter(|p| p.owner.id == user_id)
            .collect())
    }

    async fn create_playlist(
        &mut self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Res<DestPlaylist> {
        self.create(name, description, public).await
    }

    async fn playlist_track_uris(&mut self, playlist_id: &str) -> Res<Vec<String>> {
        self.track_uris(playlist_id).await
    }

    async fn add_playlist_tracks(&mut self, playlist_id: &str, uris: &[String]) -> Res<()> {
        self.add_tracks(playlist_id, uris).await
    }
}

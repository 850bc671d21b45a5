use crate::{
    Res,
    client::ApiRequest,
    spotify::SpotifyClient,
    types::{
        AddTrackToPlaylistRequest, CreatePlaylistRequest, CurrentUser, DestPlaylist, Page,
        PlaylistItem,
    },
};

impl SpotifyClient {
    /// Fetches and caches the id of the authenticated user.
    pub(super) async fn current_user_id(&mut self) -> Res<String> {
        if let Some(id) = &self.user_id {
            return Ok(id.clone());
        }
        let request = ApiRequest::get(self.endpoint("/me"));
        let user: CurrentUser = self.client.get_json(&request).await?;
        self.user_id = Some(user.id.clone());
        Ok(user.id)
    }

    /// Every playlist in the user's library, owned or merely followed.
    pub(super) async fn followed_playlists(&mut self) -> Res<Vec<DestPlaylist>> {
        let request = ApiRequest::get(self.endpoint("/me/playlists")).query("limit", 50);
        let first: Page<DestPlaylist> = self.client.get_json(&request).await?;
        self.client.drain_paginated(first).await
    }

    pub(super) async fn create(
        &mut self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Res<DestPlaylist> {
        let user_id = self.current_user_id().await?;
        let request = ApiRequest::post(self.endpoint(&format!("/users/{user_id}/playlists")))
            .json(&CreatePlaylistRequest {
                name: name.to_string(),
                description: description.to_string(),
                public,
                collaborative: false,
            })?;
        self.client.get_json(&request).await
    }

    /// URIs of the playlist's current tracks; local files and removed
    /// tracks come back without a track object and are skipped.
    pub(super) async fn track_uris(&mut self, playlist_id: &str) -> Res<Vec<String>> {
        let request = ApiRequest::get(self.endpoint(&format!("/playlists/{playlist_id}/tracks")))
            .query("limit", 100);
        let first: Page<PlaylistItem> = self.client.get_json(&request).await?;
        let items = self.client.drain_paginated(first).await?;
        Ok(items
            .into_iter()
            .filter_map(|item| item.track.map(|track| track.uri))
            .collect())
    }

    pub(super) async fn add_tracks(&mut self, playlist_id: &str, uris: &[String]) -> Res<()> {
        let request = ApiRequest::post(self.endpoint(&format!("/playlists/{playlist_id}/tracks")))
            .json(&AddTrackToPlaylistRequest {
                uris: uris.to_vec(),
            })?;
        self.client.send(&request).await?;
        Ok(())
    }
}

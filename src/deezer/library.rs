use serde::de::DeserializeOwned;

use crate::{
    Res, SyncError,
    client::ApiRequest,
    deezer::{DeezerClient, SERVICE},
    info,
    reconcile::is_loved_tracks,
    types::{
        Favourites, PlaylistSnapshot, SourceAlbum, SourceArtist, SourceLibrary, SourcePage,
        SourcePlaylist, SourceTrack,
    },
};

pub const PAGE_SIZE: usize = 50;

impl DeezerClient {
    /// Reads every page of an offset-paginated listing, advancing `index` by
    /// the size of each page until one comes back empty.
    pub async fn drain_offset<T: DeserializeOwned>(&mut self, url: &str) -> Res<Vec<T>> {
        let mut items = Vec::new();
        let mut index = 0;

        loop {
            let request = ApiRequest::get(url)
                .query("limit", PAGE_SIZE)
                .query("index", index);
            let page: SourcePage<T> = self.client.get_json(&request).await?;

            if let Some(error) = page.error {
                return Err(SyncError::Api {
                    service: SERVICE.to_string(),
                    message: format!("{} ({})", error.message, error.kind),
                });
            }
            if page.data.is_empty() {
                break;
            }

            index += page.data.len();
            items.extend(page.data);
        }

        Ok(items)
    }

    pub async fn favourites(&mut self) -> Res<Favourites> {
        info!("Getting favourite artists");
        let url = self.endpoint("/user/me/artists");
        let artists: Vec<SourceArtist> = self.drain_offset(&url).await?;
        info!("Getting favourite albums");
        let url = self.endpoint("/user/me/albums");
        let albums: Vec<SourceAlbum> = self.drain_offset(&url).await?;
        info!("Getting favourite tracks");
        let url = self.endpoint("/user/me/tracks");
        let tracks: Vec<SourceTrack> = self.drain_offset(&url).await?;

        Ok(Favourites {
            artists,
            albums,
            tracks,
        })
    }

    /// Every user playlist with its full tracklist, except the "Loved
    /// Tracks" playlist that mirrors the favourite tracks.
    pub async fn playlists(&mut self) -> Res<Vec<PlaylistSnapshot>> {
        let url = self.endpoint("/user/me/playlists");
        let playlists: Vec<SourcePlaylist> = self.drain_offset(&url).await?;

        let mut snapshots = Vec::new();
        for playlist in playlists {
            if playlist.is_loved_track || is_loved_tracks(&playlist.title) {
                continue;
            }

            info!("Getting tracklist of {}", playlist.title);
            let source_tracks: Vec<SourceTrack> = self.drain_offset(&playlist.tracklist).await?;
            snapshots.push(PlaylistSnapshot {
                name: playlist.title,
                public: playlist.public,
                source_tracks,
            });
        }

        Ok(snapshots)
    }

    pub async fn enumerate(&mut self) -> Res<SourceLibrary> {
        let favourites = self.favourites().await?;
        let playlists = self.playlists().await?;
        Ok(SourceLibrary {
            favourites,
            playlists,
        })
    }
}

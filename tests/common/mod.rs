#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;

use migratify::{
    Res, SyncError,
    client::{
        ApiRequest, ApiResponse, AuthPlacement, Authenticator, CatalogClient, ClientConfig,
        TokenStore, Transport,
    },
    reconcile::SearchQuery,
    sync::{CatalogSearch, DestinationCatalog},
    types::{
        DestAlbum, DestArtist, DestPlaylist, DestTrack, Page, PlaylistOwner, SearchResult,
        SourceAlbum, SourceAlbumRef, SourceArtist, SourceTrack, Token,
    },
};

pub fn token(access: &str, expires_in: Option<i64>, age: i64) -> Token {
    Token {
        access_token: access.to_string(),
        refresh_token: Some(format!("{access}-refresh")),
        scope: None,
        expires_in,
        obtained_at: Utc::now().timestamp() - age,
    }
}

pub fn fresh_token(access: &str) -> Token {
    token(access, Some(3600), 0)
}

pub fn expired_token(access: &str) -> Token {
    token(access, Some(3600), 7200)
}

/// Replays canned responses in order and records every request it sees.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<ApiResponse>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<ApiResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Res<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::new(500, "script exhausted")))
    }
}

pub fn ok(body: &str) -> ApiResponse {
    ApiResponse::new(200, body)
}

pub fn status(code: u16) -> ApiResponse {
    ApiResponse::new(code, "")
}

pub fn retry_after(seconds: u64) -> ApiResponse {
    let mut response = ApiResponse::new(429, "");
    response.retry_after = Some(seconds);
    response
}

/// Issues `token-1`, `token-2`, ... and counts calls.
#[derive(Clone, Default)]
pub struct FakeAuthenticator {
    pub authentications: Arc<Mutex<u32>>,
    pub refreshes: Arc<Mutex<u32>>,
    pub refresh_fails: bool,
    pub authentication_fails: bool,
}

impl FakeAuthenticator {
    pub fn failing_refresh() -> Self {
        Self {
            refresh_fails: true,
            ..Self::default()
        }
    }

    pub fn authentications(&self) -> u32 {
        *self.authentications.lock().unwrap()
    }

    pub fn refreshes(&self) -> u32 {
        *self.refreshes.lock().unwrap()
    }
}

#[async_trait]
impl Authenticator for FakeAuthenticator {
    async fn authenticate(&self) -> Res<Token> {
        if self.authentication_fails {
            return Err(SyncError::auth("fake", "consent denied"));
        }
        let mut count = self.authentications.lock().unwrap();
        *count += 1;
        Ok(fresh_token(&format!("token-{}", *count)))
    }

    async fn refresh(&self, token: &Token) -> Res<Token> {
        *self.refreshes.lock().unwrap() += 1;
        if self.refresh_fails {
            return Err(SyncError::auth("fake", "refresh rejected"));
        }
        Ok(fresh_token(&format!("{}-refreshed", token.access_token)))
    }
}

#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    pub token: Arc<Mutex<Option<Token>>>,
    pub saves: Arc<Mutex<u32>>,
    pub invalidations: Arc<Mutex<u32>>,
}

impl MemoryTokenStore {
    pub fn with(token: Token) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token))),
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<Token> {
        self.token.lock().unwrap().clone()
    }

    pub fn saves(&self) -> u32 {
        *self.saves.lock().unwrap()
    }

    pub fn invalidations(&self) -> u32 {
        *self.invalidations.lock().unwrap()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Res<Option<Token>> {
        Ok(self.current())
    }

    async fn save(&self, token: &Token) -> Res<()> {
        *self.token.lock().unwrap() = Some(token.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    async fn invalidate(&self) -> Res<()> {
        *self.token.lock().unwrap() = None;
        *self.invalidations.lock().unwrap() += 1;
        Ok(())
    }
}

pub struct Harness {
    pub transport: ScriptedTransport,
    pub authenticator: FakeAuthenticator,
    pub store: MemoryTokenStore,
}

impl Harness {
    pub fn new(responses: Vec<ApiResponse>, store: MemoryTokenStore) -> Self {
        Self {
            transport: ScriptedTransport::new(responses),
            authenticator: FakeAuthenticator::default(),
            store,
        }
    }

    pub fn client(&self, placement: AuthPlacement) -> CatalogClient {
        CatalogClient::new(
            ClientConfig::new("fake", placement).with_gateway_retry_delay(Duration::ZERO),
            Box::new(self.transport.clone()),
            Box::new(self.authenticator.clone()),
            Box::new(self.store.clone()),
        )
    }
}

// Source fixtures.

pub fn source_artist(id: u64, name: &str) -> SourceArtist {
    SourceArtist {
        id,
        name: name.to_string(),
    }
}

pub fn source_album(id: u64, title: &str, artist: &str) -> SourceAlbum {
    SourceAlbum {
        id,
        title: title.to_string(),
        artist: source_artist(id + 1000, artist),
    }
}

pub fn source_track(id: u64, title: &str, artist: &str, album: &str) -> SourceTrack {
    SourceTrack {
        id,
        title: title.to_string(),
        artist: source_artist(id + 1000, artist),
        album: SourceAlbumRef {
            id: id + 2000,
            title: album.to_string(),
        },
    }
}

// Destination fixtures.

pub fn dest_artist(id: &str, name: &str) -> DestArtist {
    DestArtist {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:artist:{id}"),
    }
}

pub fn dest_album(id: &str, name: &str, artist: &str) -> DestAlbum {
    DestAlbum {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:album:{id}"),
        artists: vec![dest_artist(&format!("{id}-artist"), artist)],
    }
}

pub fn dest_track(id: &str, name: &str, artist: &str, album: &str) -> DestTrack {
    DestTrack {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{id}"),
        album: dest_album(&format!("{id}-album"), album, artist),
        artists: vec![dest_artist(&format!("{id}-artist"), artist)],
    }
}

pub fn page<T>(items: Vec<T>) -> Page<T> {
    let total = items.len() as u64;
    Page {
        items,
        next: None,
        total,
    }
}

pub fn track_result(tracks: Vec<DestTrack>) -> SearchResult {
    SearchResult {
        tracks: Some(page(tracks)),
        ..SearchResult::default()
    }
}

pub fn album_result(albums: Vec<DestAlbum>) -> SearchResult {
    SearchResult {
        albums: Some(page(albums)),
        ..SearchResult::default()
    }
}

pub fn artist_result(artists: Vec<DestArtist>) -> SearchResult {
    SearchResult {
        artists: Some(page(artists)),
        ..SearchResult::default()
    }
}

/// Answers searches from a fixed table keyed by the rendered query and
/// records every query; unknown queries return no hits. Fails once
/// `fail_after` searches have been made.
#[derive(Default)]
pub struct FakeSearch {
    pub answers: Vec<(String, SearchResult)>,
    pub queries: Vec<String>,
    pub fail_after: Option<usize>,
}

impl FakeSearch {
    pub fn answer(mut self, query: &str, result: SearchResult) -> Self {
        self.answers.push((query.to_string(), result));
        self
    }
}

#[async_trait]
impl CatalogSearch for FakeSearch {
    async fn search(&mut self, query: &SearchQuery) -> Res<SearchResult> {
        if self.fail_after.is_some_and(|limit| self.queries.len() >= limit) {
            return Err(SyncError::TransientServer {
                url: "https://api.test/search".to_string(),
                status: 504,
            });
        }

        let rendered = query.to_search_string();
        self.queries.push(rendered.clone());
        Ok(self
            .answers
            .iter()
            .find(|(q, _)| *q == rendered)
            .map(|(_, result)| result.clone())
            .unwrap_or_default())
    }
}

/// An in-memory destination account.
#[derive(Default)]
pub struct FakeDestination {
    pub user_id: String,
    pub playlists: Vec<DestPlaylist>,
    pub playlist_tracks: Vec<(String, Vec<String>)>,
    pub followed: Vec<Vec<String>>,
    pub saved_albums: Vec<Vec<String>>,
    pub saved_tracks: Vec<Vec<String>>,
    pub added: Vec<(String, Vec<String>)>,
    pub created: Vec<(String, bool)>,
}

impl FakeDestination {
    pub fn with_playlist(mut self, id: &str, name: &str, owner: &str, uris: &[&str]) -> Self {
        self.playlists.push(DestPlaylist {
            id: id.to_string(),
            name: name.to_string(),
            owner: PlaylistOwner {
                id: owner.to_string(),
            },
        });
        self.playlist_tracks.push((
            id.to_string(),
            uris.iter().map(|u| u.to_string()).collect(),
        ));
        self
    }

    pub fn added_to(&self, playlist_id: &str) -> Vec<Vec<String>> {
        self.added
            .iter()
            .filter(|(id, _)| id == playlist_id)
            .map(|(_, uris)| uris.clone())
            .collect()
    }
}

#[async_trait]
impl DestinationCatalog for FakeDestination {
    async fn follow_artists(&mut self, ids: &[String]) -> Res<()> {
        self.followed.push(ids.to_vec());
        Ok(())
    }

    async fn save_albums(&mut self, ids: &[String]) -> Res<()> {
        self.saved_albums.push(ids.to_vec());
        Ok(())
    }

    async fn save_tracks(&mut self, ids: &[String]) -> Res<()> {
        self.saved_tracks.push(ids.to_vec());
        Ok(())
    }

    async fn own_playlists(&mut self) -> Res<Vec<DestPlaylist>> {
        Ok(self
            .playlists
            .iter()
            .filter(|p| p.owner.id == self.user_id)
            .cloned()
            .collect())
    }

    async fn create_playlist(
        &mut self,
        name: &str,
        _description: &str,
        public: bool,
    ) -> Res<DestPlaylist> {
        let playlist = DestPlaylist {
            id: format!("created-{}", self.created.len() + 1),
            name: name.to_string(),
            owner: PlaylistOwner {
                id: self.user_id.clone(),
            },
        };
        self.created.push((name.to_string(), public));
        self.playlists.push(playlist.clone());
        self.playlist_tracks.push((playlist.id.clone(), Vec::new()));
        Ok(playlist)
    }

    async fn playlist_track_uris(&mut self, playlist_id: &str) -> Res<Vec<String>> {
        Ok(self
            .playlist_tracks
            .iter()
            .find(|(id, _)| id == playlist_id)
            .map(|(_, uris)| uris.clone())
            .unwrap_or_default())
    }

    async fn add_playlist_tracks(&mut self, playlist_id: &str, uris: &[String]) -> Res<()> {
        self.added.push((playlist_id.to_string(), uris.to_vec()));
        if let Some((_, tracks)) = self
            .playlist_tracks
            .iter_mut()
            .find(|(id, _)| id == playlist_id)
        {
            tracks.extend(uris.iter().cloned());
        }
        Ok(())
    }
}

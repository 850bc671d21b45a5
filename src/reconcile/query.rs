use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{EntityKind, SourceAlbum, SourceArtist, SourceTrack};

/// Longest free-text field the destination search accepts per filter.
pub const FIELD_LIMIT: usize = 60;

static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*) \((.*)\)$").expect("parenthetical pattern is valid")
});

/// Structured search for one source entity.
///
/// The same value renders the destination search string and judges the
/// candidates that search returned, so nothing is ever parsed back out of the
/// rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub kind: EntityKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

/// The fields of a destination entity the exact-match predicate compares.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub id: &'a str,
    pub uri: &'a str,
    pub title: &'a str,
    pub album: Option<&'a str>,
    pub artists: Vec<&'a str>,
}

impl Candidate<'_> {
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().copied()
    }

    /// `title :: album :: artist/artist`, the form shown to operators.
    pub fn describe(&self) -> String {
        let mut parts = vec![self.title.to_string()];
        if let Some(album) = self.album {
            parts.push(album.to_string());
        }
        if !self.artists.is_empty() {
            parts.push(self.artists.join("/"));
        }
        parts.join(" :: ")
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(FIELD_LIMIT).collect()
}

impl SearchQuery {
    pub fn for_track(track: &SourceTrack) -> Self {
        Self {
            kind: EntityKind::Track,
            title: truncate(&track.title),
            artist: Some(truncate(&track.artist.name)),
            album: Some(truncate(&track.album.title)),
        }
    }

    pub fn for_album(album: &SourceAlbum) -> Self {
        Self {
            kind: EntityKind::Album,
            title: truncate(&album.title),
            artist: Some(truncate(&album.artist.name)),
            album: None,
        }
    }

    pub fn for_artist(artist: &SourceArtist) -> Self {
        Self {
            kind: EntityKind::Artist,
            title: artist.name.clone(),
            artist: None,
            album: None,
        }
    }

    /// Track searches from most to least specific: full, without album,
    /// title only. Other kinds have no fallback.
    pub fn fallbacks(&self) -> Vec<SearchQuery> {
        if self.kind != EntityKind::Track {
            return vec![self.clone()];
        }

        let mut chain = vec![self.clone()];
        if self.album.is_some() {
            chain.push(Self {
                album: None,
                ..self.clone()
            });
        }
        if self.artist.is_some() {
            chain.push(Self {
                artist: None,
                album: None,
                ..self.clone()
            });
        }
        chain
    }

    /// Renders the destination's `field:value` search syntax.
    pub fn to_search_string(&self) -> String {
        match self.kind {
            EntityKind::Artist => format!("artist:{}", self.title),
            EntityKind::Album => {
                let mut query = format!("album:{}", self.title);
                if let Some(artist) = &self.artist {
                    query.push_str(&format!(" artist:{}", artist));
                }
                query
            }
            EntityKind::Track => {
                let mut query = format!("track:{}", self.title);
                if let Some(artist) = &self.artist {
                    query.push_str(&format!(" artist:{}", artist));
                }
                if let Some(album) = &self.album {
                    query.push_str(&format!(" album:{}", album));
                }
                query
            }
        }
    }

    /// Whether every field the kind is matched on is present. Relaxed track
    /// queries produced by [`SearchQuery::fallbacks`] are not.
    pub fn is_complete(&self) -> bool {
        match self.kind {
            EntityKind::Artist => true,
            EntityKind::Album => self.artist.is_some(),
            EntityKind::Track => self.artist.is_some() && self.album.is_some(),
        }
    }

    /// `base (detail)` rewritten as `base - detail`, lowercased.
    pub fn normalized_title(&self) -> Option<String> {
        let title = self.title.to_lowercase();
        let captures = PARENTHETICAL.captures(&title)?;
        Some(format!("{} - {}", &captures[1], &captures[2]))
    }

    /// First candidate whose fields equal the query case-insensitively,
    /// falling back to the normalized title when nothing matches as is.
    pub fn find_match<'c, 'a>(&self, candidates: &'c [Candidate<'a>]) -> Option<&'c Candidate<'a>> {
        if !self.is_complete() {
            return None;
        }

        let title = self.title.to_lowercase();
        candidates
            .iter()
            .find(|c| self.matches_with_title(&title, c))
            .or_else(|| {
                let alternative = self.normalized_title()?;
                candidates
                    .iter()
                    .find(|c| self.matches_with_title(&alternative, c))
            })
    }

    pub fn matches(&self, candidate: &Candidate<'_>) -> bool {
        self.is_complete() && self.matches_with_title(&self.title.to_lowercase(), candidate)
    }

    fn matches_with_title(&self, title: &str, candidate: &Candidate<'_>) -> bool {
        if candidate.title.to_lowercase() != title {
            return false;
        }

        let artist_matches = match &self.artist {
            Some(artist) => candidate
                .primary_artist()
                .is_some_and(|name| name.to_lowercase() == artist.to_lowercase()),
            None => true,
        };
        let album_matches = match &self.album {
            Some(album) => candidate
                .album
                .is_some_and(|name| name.to_lowercase() == album.to_lowercase()),
            None => true,
        };

        artist_matches && album_matches
    }
}

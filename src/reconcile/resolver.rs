use std::fmt;

use serde::Serialize;

use crate::{
    reconcile::{Candidate, IgnorePolicy, PatternIgnorePolicy},
    types::{EntityKind, ManualItem, SearchRecord, SearchResult},
};

/// Which destination identifier an accepted candidate contributes.
///
/// Library endpoints take ids, playlist endpoints take URIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdForm {
    Id,
    Uri,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Accepted(String),
    Manual(ManualItem),
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    NoResult,
    Ambiguous,
    Ignored,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticKind::NoResult => "no-result",
            DiagnosticKind::Ambiguous => "ambiguous",
            DiagnosticKind::Ignored => "ignored",
        })
    }
}

/// Observability record of a resolution that was not a clean accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub entity_kind: EntityKind,
    pub query: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
}

impl SearchResult {
    /// Reported hit count for `kind`; a missing block counts as zero.
    pub fn total(&self, kind: EntityKind) -> u64 {
        match kind {
            EntityKind::Artist => self.artists.as_ref().map_or(0, |p| p.total),
            EntityKind::Album => self.albums.as_ref().map_or(0, |p| p.total),
            EntityKind::Track => self.tracks.as_ref().map_or(0, |p| p.total),
        }
    }

    /// Candidates of `kind` in destination order.
    pub fn candidates(&self, kind: EntityKind) -> Vec<Candidate<'_>> {
        match kind {
            EntityKind::Artist => self
                .artists
                .iter()
                .flat_map(|page| page.items.iter())
                .map(|artist| Candidate {
                    id: &artist.id,
                    uri: &artist.uri,
                    title: &artist.name,
                    album: None,
                    artists: vec![artist.name.as_str()],
                })
                .collect(),
            EntityKind::Album => self
                .albums
                .iter()
                .flat_map(|page| page.items.iter())
                .map(|album| Candidate {
                    id: &album.id,
                    uri: &album.uri,
                    title: &album.name,
                    album: None,
                    artists: album.artists.iter().map(|a| a.name.as_str()).collect(),
                })
                .collect(),
            EntityKind::Track => self
                .tracks
                .iter()
                .flat_map(|page| page.items.iter())
                .map(|track| Candidate {
                    id: &track.id,
                    uri: &track.uri,
                    title: &track.name,
                    album: Some(track.album.name.as_str()),
                    artists: track.artists.iter().map(|a| a.name.as_str()).collect(),
                })
                .collect(),
        }
    }
}

/// The reconciliation engine: turns one search record into a disposition.
pub struct Resolver {
    policy: Box<dyn IgnorePolicy>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Box::new(PatternIgnorePolicy::default()))
    }
}

impl Resolver {
    pub fn new(policy: Box<dyn IgnorePolicy>) -> Self {
        Self {
            policy,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn resolve(&mut self, record: &SearchRecord, form: IdForm) -> Resolution {
        let kind = record.entity_kind;
        // operators and the allow-list see the full query, not the relaxed one
        let initial = record.initial_query();
        let query = initial.to_search_string();
        let candidates = record.result.candidates(kind);

        match record.result.total(kind) {
            0 => {
                // artists are never allow-listed
                if kind != EntityKind::Artist && self.policy.is_expected_absent(initial) {
                    self.emit(DiagnosticKind::Ignored, kind, &query, Vec::new());
                    return Resolution::Ignored;
                }
                self.emit(DiagnosticKind::NoResult, kind, &query, Vec::new());
                Resolution::Manual(ManualItem {
                    query,
                    candidates: Vec::new(),
                })
            }
            1 => match candidates.first() {
                Some(candidate) => Resolution::Accepted(identifier(candidate, form)),
                None => {
                    self.emit(DiagnosticKind::NoResult, kind, &query, Vec::new());
                    Resolution::Manual(ManualItem {
                        query,
                        candidates: Vec::new(),
                    })
                }
            },
            _ => match record.query.find_match(&candidates) {
                Some(candidate) => Resolution::Accepted(identifier(candidate, form)),
                None => {
                    let described: Vec<String> =
                        candidates.iter().map(Candidate::describe).collect();
                    self.emit(DiagnosticKind::Ambiguous, kind, &query, described.clone());
                    Resolution::Manual(ManualItem {
                        query,
                        candidates: described,
                    })
                }
            },
        }
    }

    fn emit(
        &mut self,
        kind: DiagnosticKind,
        entity_kind: EntityKind,
        query: &str,
        candidates: Vec<String>,
    ) {
        self.diagnostics.push(Diagnostic {
            kind,
            entity_kind,
            query: query.to_string(),
            candidates,
        });
    }
}

fn identifier(candidate: &Candidate<'_>, form: IdForm) -> String {
    match form {
        IdForm::Id => candidate.id.to_string(),
        IdForm::Uri => candidate.uri.to_string(),
    }
}

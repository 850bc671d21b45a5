use regex::Regex;

use crate::{Res, reconcile::SearchQuery};

/// Titles known to be missing from the destination catalog on purpose.
pub const DEFAULT_IGNORE_PATTERN: &str = r"(Vivaldi|Mozart|Beethoven) Recomposed";

/// Decides which zero-hit searches are expected and should be dropped
/// instead of queued for manual review.
pub trait IgnorePolicy: Send + Sync {
    fn is_expected_absent(&self, query: &SearchQuery) -> bool;
}

/// Matches a regular expression against the rendered search string.
#[derive(Debug, Clone)]
pub struct PatternIgnorePolicy {
    pattern: Regex,
}

impl PatternIgnorePolicy {
    pub fn new(pattern: &str) -> Res<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn recomposed() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_IGNORE_PATTERN).expect("default ignore pattern is valid"),
        }
    }
}

impl Default for PatternIgnorePolicy {
    fn default() -> Self {
        Self::recomposed()
    }
}

impl IgnorePolicy for PatternIgnorePolicy {
    fn is_expected_absent(&self, query: &SearchQuery) -> bool {
        self.pattern.is_match(&query.to_search_string())
    }
}

/// Sends every zero-hit search to manual review.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIgnore;

impl IgnorePolicy for NoIgnore {
    fn is_expected_absent(&self, _query: &SearchQuery) -> bool {
        false
    }
}

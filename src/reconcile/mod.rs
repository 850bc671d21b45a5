//! # Reconciliation
//!
//! Bridges the source and destination catalogs structurally: a
//! [`SearchQuery`] built from a Deezer entity is sent to Spotify's search, and
//! the [`Resolver`] decides from the result whether the entity maps onto one
//! destination identifier, needs a human, or is expected to be absent.
//! [`workset::build`] runs that decision over the whole library.

mod policy;
mod query;
mod resolver;
pub mod workset;

pub use policy::{DEFAULT_IGNORE_PATTERN, IgnorePolicy, NoIgnore, PatternIgnorePolicy};
pub use query::{Candidate, FIELD_LIMIT, SearchQuery};
pub use resolver::{Diagnostic, DiagnosticKind, IdForm, Resolution, Resolver};
pub use workset::{LOVED_TRACKS, RecordIndex, is_loved_tracks};

use thiserror::Error;

use crate::{management::Stage, types::EntityKind};

/// Everything that can stop a migration stage.
///
/// Only authentication failures and repeated `Unauthorized`/`TransientServer`
/// responses are fatal by nature; ambiguous or missing matches never show up
/// here because the resolver routes them into the manual work set.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{service} authentication failed: {reason}")]
    AuthFailure { service: String, reason: String },

    #[error("{url} rejected the credentials again after re-authentication")]
    Unauthorized { url: String },

    #[error("{url} timed out again after retrying (status {status})")]
    TransientServer { url: String, status: u16 },

    #[error("{url} asked to retry after {seconds} seconds, giving up")]
    RateLimited { url: String, seconds: u64 },

    #[error("{url} returned status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("{service} reported an error: {message}")]
    Api { service: String, message: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing configuration value {0}")]
    Config(String),

    #[error("invalid ignore pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("stage {required} not reached yet (currently {current}), run `migratify {command}` first")]
    StageNotReached {
        required: Stage,
        current: Stage,
        command: &'static str,
    },

    #[error("no search record for {kind} {id}, run `migratify search` again")]
    MissingSearchRecord { id: u64, kind: EntityKind },
}

impl SyncError {
    pub fn auth(service: &str, reason: impl Into<String>) -> Self {
        SyncError::AuthFailure {
            service: service.to_string(),
            reason: reason.into(),
        }
    }
}

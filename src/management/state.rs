use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{Res, SyncError, deezer, management::FileTokenStore, spotify};

pub const TOKENS_DIR: &str = "tokens";
pub const SOURCE_LIBRARY_FILE: &str = "source-library.json";
pub const SEARCH_RECORDS_FILE: &str = "search-records.json";
pub const WORK_SET_FILE: &str = "work-set.json";
pub const APPLY_REPORT_FILE: &str = "apply-report.json";

/// Pipeline position, derived from the artifacts each stage leaves on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Unauthenticated,
    Authenticated,
    Enumerated,
    Searched,
    Resolved,
    Applied,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Unauthenticated,
        Stage::Authenticated,
        Stage::Enumerated,
        Stage::Searched,
        Stage::Resolved,
        Stage::Applied,
    ];

    /// The command whose successful run reaches this stage.
    pub fn command(&self) -> &'static str {
        match self {
            Stage::Unauthenticated => "status",
            Stage::Authenticated => "auth",
            Stage::Enumerated => "enumerate",
            Stage::Searched => "search",
            Stage::Resolved => "resolve",
            Stage::Applied => "apply",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Unauthenticated => "unauthenticated",
            Stage::Authenticated => "authenticated",
            Stage::Enumerated => "enumerated",
            Stage::Searched => "searched",
            Stage::Resolved => "resolved",
            Stage::Applied => "applied",
        })
    }
}

pub struct StateManager {
    root: PathBuf,
}

impl StateManager {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn artifacts(&self, stage: Stage) -> Vec<PathBuf> {
        match stage {
            Stage::Unauthenticated => Vec::new(),
            Stage::Authenticated => vec![
                FileTokenStore::token_path(&self.root, deezer::SERVICE),
                FileTokenStore::token_path(&self.root, spotify::SERVICE),
            ],
            Stage::Enumerated => vec![self.root.join(SOURCE_LIBRARY_FILE)],
            Stage::Searched => vec![self.root.join(SEARCH_RECORDS_FILE)],
            Stage::Resolved => vec![self.root.join(WORK_SET_FILE)],
            Stage::Applied => vec![self.root.join(APPLY_REPORT_FILE)],
        }
    }

    pub async fn reached(&self, stage: Stage) -> bool {
        for path in self.artifacts(stage) {
            if async_fs::metadata(&path).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Highest stage whose artifacts, and those of every earlier stage, exist.
    pub async fn current(&self) -> Stage {
        let mut current = Stage::Unauthenticated;
        for stage in Stage::ALL {
            if !self.reached(stage).await {
                break;
            }
            current = stage;
        }
        current
    }

    /// Fails unless `stage` has been reached.
    pub async fn require(&self, stage: Stage) -> Res<()> {
        let current = self.current().await;
        if current >= stage {
            return Ok(());
        }
        Err(SyncError::StageNotReached {
            required: stage,
            current,
            command: stage.command(),
        })
    }
}

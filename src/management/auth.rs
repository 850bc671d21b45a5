use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{
    Res,
    client::TokenStore,
    management::{TOKENS_DIR, read_json, write_json},
    types::Token,
};

/// Caches one service's token as `<root>/tokens/<service>.json`.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(root: &Path, service: &str) -> Self {
        Self {
            path: Self::token_path(root, service),
        }
    }

    pub fn token_path(root: &Path, service: &str) -> PathBuf {
        root.join(TOKENS_DIR).join(format!("{service}.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Res<Option<Token>> {
        match read_json::<Token>(&self.path).await {
            Ok(token) if !token.access_token.is_empty() => Ok(Some(token)),
            Ok(_) => Ok(None),
            Err(crate::SyncError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn save(&self, token: &Token) -> Res<()> {
        write_json(&self.path, token).await
    }

    async fn invalidate(&self) -> Res<()> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

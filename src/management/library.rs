use std::path::{Path, PathBuf};

use crate::{
    Res,
    management::{SOURCE_LIBRARY_FILE, read_json, write_json},
    types::SourceLibrary,
};

pub struct LibraryManager {
    root: PathBuf,
    library: SourceLibrary,
}

impl LibraryManager {
    pub fn new(root: &Path, library: SourceLibrary) -> Self {
        Self {
            root: root.to_path_buf(),
            library,
        }
    }

    pub async fn load(root: &Path) -> Res<Self> {
        let library = read_json(&Self::snapshot_path(root)).await?;
        Ok(Self::new(root, library))
    }

    pub async fn persist(&self) -> Res<()> {
        write_json(&Self::snapshot_path(&self.root), &self.library).await
    }

    pub fn library(&self) -> &SourceLibrary {
        &self.library
    }

    pub fn count_favourites(&self) -> usize {
        let favourites = &self.library.favourites;
        favourites.artists.len() + favourites.albums.len() + favourites.tracks.len()
    }

    pub fn count_playlist_tracks(&self) -> usize {
        self.library
            .playlists
            .iter()
            .map(|p| p.source_tracks.len())
            .sum()
    }

    fn snapshot_path(root: &Path) -> PathBuf {
        root.join(SOURCE_LIBRARY_FILE)
    }
}

use std::path::{Path, PathBuf};

use crate::{
    Res,
    management::{APPLY_REPORT_FILE, WORK_SET_FILE, read_json, write_json},
    types::{ApplyReport, WorkSet},
};

pub struct WorkSetManager {
    root: PathBuf,
    work: WorkSet,
}

impl WorkSetManager {
    pub fn new(root: &Path, work: WorkSet) -> Self {
        Self {
            root: root.to_path_buf(),
            work,
        }
    }

    pub async fn load(root: &Path) -> Res<Self> {
        let work = read_json(&root.join(WORK_SET_FILE)).await?;
        Ok(Self::new(root, work))
    }

    pub async fn persist(&self) -> Res<()> {
        write_json(&self.root.join(WORK_SET_FILE), &self.work).await
    }

    pub fn work(&self) -> &WorkSet {
        &self.work
    }

    pub fn count_manual(&self) -> usize {
        self.work.manual_artists.len()
            + self.work.manual_albums.len()
            + self.work.manual_tracks.len()
            + self
                .work
                .manual_playlists
                .iter()
                .map(|p| p.tracks.len())
                .sum::<usize>()
    }
}

pub struct ApplyReportManager;

impl ApplyReportManager {
    pub async fn persist(root: &Path, report: &ApplyReport) -> Res<()> {
        write_json(&Self::report_path(root), report).await
    }

    pub async fn load(root: &Path) -> Res<ApplyReport> {
        read_json(&Self::report_path(root)).await
    }

    fn report_path(root: &Path) -> PathBuf {
        root.join(APPLY_REPORT_FILE)
    }
}

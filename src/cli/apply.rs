use tabled::{Table, Tabled};

use crate::{
    Res, config,
    management::{ApplyReportManager, Stage, StateManager, WorkSetManager},
    spotify::SpotifyClient,
    success,
    sync::SyncApplier,
    types::ApplyReport,
};

#[derive(Tabled)]
pub(super) struct ReportRow {
    operation: &'static str,
    count: usize,
}

pub(super) fn report_rows(report: &ApplyReport) -> Vec<ReportRow> {
    [
        ("artists followed", report.artists_followed),
        ("albums saved", report.albums_saved),
        ("tracks saved", report.tracks_saved),
        ("playlists created", report.playlists_created),
        ("playlists reused", report.playlists_reused),
        ("playlist tracks added", report.playlist_tracks_added),
        ("playlist tracks already present", report.playlist_tracks_skipped),
    ]
    .into_iter()
    .map(|(operation, count)| ReportRow { operation, count })
    .collect()
}

/// Replays the work set against the Spotify account. Safe to run again.
pub async fn apply() -> Res<()> {
    let root = config::data_dir();
    StateManager::new(&root).require(Stage::Resolved).await?;

    let work = WorkSetManager::load(&root).await?;
    let mut spotify = SpotifyClient::from_env(&root)?;
    let report = SyncApplier::new(&mut spotify).apply(work.work()).await?;
    ApplyReportManager::persist(&root, &report).await?;

    println!("{}", Table::new(report_rows(&report)));
    success!("Library applied to Spotify");
    Ok(())
}

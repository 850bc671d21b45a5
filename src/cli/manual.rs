use clap::ValueEnum;
use tabled::Table;

use crate::{
    Res, config,
    management::{Stage, StateManager, WorkSetManager},
    success,
    types::{ManualItem, ManualPlaylistTableRow, ManualTableRow},
    utils, warning,
};

const CANDIDATE_WIDTH: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ManualSection {
    Artists,
    Albums,
    Tracks,
    Playlists,
}

fn item_rows(items: &[ManualItem]) -> Vec<ManualTableRow> {
    items
        .iter()
        .map(|item| ManualTableRow {
            query: item.query.clone(),
            candidates: utils::ellipsize(&item.candidates.join("\n"), CANDIDATE_WIDTH),
        })
        .collect()
}

/// Lists the items of one section that need a human decision.
///
/// For playlists, `name` narrows the listing to the unresolved tracks of a
/// single playlist; without it one row per playlist is printed.
pub async fn manual(section: ManualSection, name: Option<String>) -> Res<()> {
    let root = config::data_dir();
    StateManager::new(&root).require(Stage::Resolved).await?;

    let manager = WorkSetManager::load(&root).await?;
    let work = manager.work();

    let table = match section {
        ManualSection::Artists => Table::new(item_rows(&work.manual_artists)),
        ManualSection::Albums => Table::new(item_rows(&work.manual_albums)),
        ManualSection::Tracks => Table::new(item_rows(&work.manual_tracks)),
        ManualSection::Playlists => match name {
            Some(name) => match work.manual_playlists.iter().find(|p| p.name == name) {
                Some(playlist) => Table::new(item_rows(&playlist.tracks)),
                None => {
                    warning!("Playlist {} has no tracks waiting for review", name);
                    return Ok(());
                }
            },
            None => Table::new(work.manual_playlists.iter().map(|p| ManualPlaylistTableRow {
                name: p.name.clone(),
                tracks: p.tracks.len(),
            })),
        },
    };

    println!("{}", table);
    success!("{} items need manual review in total", manager.count_manual());
    Ok(())
}

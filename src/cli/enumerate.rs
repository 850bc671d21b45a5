use crate::{
    Res, config,
    deezer::DeezerClient,
    management::{LibraryManager, Stage, StateManager},
    success, utils,
};

/// Reads the whole source library and stores it as the enumeration snapshot.
pub async fn enumerate() -> Res<()> {
    let root = config::data_dir();
    StateManager::new(&root).require(Stage::Authenticated).await?;

    let mut deezer = DeezerClient::from_env(&root)?;
    let pb = utils::spinner("Reading the Deezer library...");
    let library = deezer.enumerate().await;
    pb.finish_and_clear();

    let manager = LibraryManager::new(&root, library?);
    manager.persist().await?;

    success!(
        "Enumerated {} favourites and {} playlists ({} playlist tracks)",
        manager.count_favourites(),
        manager.library().playlists.len(),
        manager.count_playlist_tracks()
    );
    Ok(())
}

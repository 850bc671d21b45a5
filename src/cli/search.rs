use crate::{
    Res, config,
    management::{LibraryManager, SearchRecordManager, Stage, StateManager},
    spotify::SpotifyClient,
    success,
    sync::run_search_stage,
    utils,
};

/// Searches Spotify for every source entity that has no search record yet.
///
/// Records are flushed even when a search fails, so running the command
/// again resumes where the failed run stopped.
pub async fn search() -> Res<()> {
    let root = config::data_dir();
    StateManager::new(&root).require(Stage::Enumerated).await?;

    let library = LibraryManager::load(&root).await?;
    let mut records = SearchRecordManager::load_or_default(&root).await?;
    let already = records.len();
    let mut spotify = SpotifyClient::from_env(&root)?;

    let pb = utils::progress_bar();
    let outcome = run_search_stage(&mut spotify, library.library(), &mut records, &pb).await;
    pb.finish_and_clear();
    let searched = outcome?;

    success!(
        "Searched {} entities ({} already recorded)",
        searched,
        already
    );
    Ok(())
}

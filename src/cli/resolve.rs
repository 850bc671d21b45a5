use crate::{
    Res, config, info,
    management::{LibraryManager, SearchRecordManager, Stage, StateManager, WorkSetManager},
    reconcile::{DiagnosticKind, PatternIgnorePolicy, Resolver, workset},
    success, warning,
};

/// Turns the search records into the work set: accepted destination ids
/// plus everything that needs a human decision.
pub async fn resolve() -> Res<()> {
    let root = config::data_dir();
    StateManager::new(&root).require(Stage::Searched).await?;

    let library = LibraryManager::load(&root).await?;
    let records = SearchRecordManager::load(&root).await?;

    let policy = match config::ignore_pattern() {
        Some(pattern) => PatternIgnorePolicy::new(&pattern)?,
        None => PatternIgnorePolicy::recomposed(),
    };
    let mut resolver = Resolver::new(Box::new(policy));
    let work = workset::build(library.library(), records.index(), &mut resolver)?;

    for diagnostic in resolver.take_diagnostics() {
        match diagnostic.kind {
            DiagnosticKind::Ignored => info!("Skipping expected absence {}", diagnostic.query),
            DiagnosticKind::NoResult => warning!("No result found for {}", diagnostic.query),
            DiagnosticKind::Ambiguous => warning!(
                "Ambiguous {} for {} ({} candidates)",
                diagnostic.entity_kind,
                diagnostic.query,
                diagnostic.candidates.len()
            ),
        }
    }

    let manager = WorkSetManager::new(&root, work);
    manager.persist().await?;

    let work = manager.work();
    success!(
        "Resolved {} artists, {} albums, {} tracks and {} playlists; {} items need manual review",
        work.artists.len(),
        work.albums.len(),
        work.tracks.len(),
        work.playlists.len(),
        manager.count_manual()
    );
    Ok(())
}

use tabled::{Table, Tabled};

use crate::{
    Res, config, info,
    management::{ApplyReportManager, Stage, StateManager},
};

use super::apply::report_rows;

#[derive(Tabled)]
struct StageRow {
    stage: String,
    reached: &'static str,
    command: &'static str,
}

/// Prints which pipeline stages have their snapshot on disk.
pub async fn status() -> Res<()> {
    let root = config::data_dir();
    let state = StateManager::new(&root);

    let mut rows = Vec::new();
    for stage in Stage::ALL.into_iter().skip(1) {
        rows.push(StageRow {
            stage: stage.to_string(),
            reached: if state.reached(stage).await { "yes" } else { "no" },
            command: stage.command(),
        });
    }

    println!("{}", Table::new(rows));
    info!("Data directory: {}", root.display());
    info!("Current stage: {}", state.current().await);

    if state.reached(Stage::Applied).await {
        let report = ApplyReportManager::load(&root).await?;
        info!("Last apply:");
        println!("{}", Table::new(report_rows(&report)));
    }
    Ok(())
}

mod auth;
mod library;
mod search;
mod state;
mod work;

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::Res;

pub use auth::FileTokenStore;
pub use library::LibraryManager;
pub use search::SearchRecordManager;
pub use state::{
    APPLY_REPORT_FILE, SEARCH_RECORDS_FILE, SOURCE_LIBRARY_FILE, Stage, StateManager, TOKENS_DIR,
    WORK_SET_FILE,
};
pub use work::{ApplyReportManager, WorkSetManager};

async fn read_json<T: DeserializeOwned>(path: &Path) -> Res<T> {
    let content = async_fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Res<()> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(value)?;
    async_fs::write(path, json).await?;
    Ok(())
}

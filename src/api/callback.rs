use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{types::AuthorizationCallback, warning};

/// Receives the consent redirect of either service and stores the
/// authorization code for the waiting authenticator.
///
/// Spotify reports a denied consent as `error`, Deezer as `error_reason`.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<AuthorizationCallback>>>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;

    if let Some(code) = params.get("code") {
        state.code = Some(code.clone());
        return Html("<h2>Authorization received.</h2><p>Close the browser window.</p>");
    }

    let reason = params
        .get("error")
        .or_else(|| params.get("error_reason"))
        .cloned()
        .unwrap_or_else(|| "missing authorization code".to_string());
    warning!("Authorization callback failed: {}", reason);
    state.error = Some(reason);
    Html("<h4>Authorization failed.</h4>")
}

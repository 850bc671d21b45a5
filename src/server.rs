use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::sync::{Mutex, oneshot};

use crate::{Res, SyncError, api, config, info, types::AuthorizationCallback, warning};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

pub fn router(state: Arc<Mutex<AuthorizationCallback>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Opens `authorize_url` in the browser and serves the redirect URI until the
/// consent flow hands back an authorization code.
///
/// The listener is shut down as soon as the code (or a consent error)
/// arrives, or after two minutes without one.
pub async fn capture_authorization_code(service: &str, authorize_url: &str) -> Res<String> {
    let raw_addr = config::server_addr()?;
    let addr = SocketAddr::from_str(&raw_addr)
        .map_err(|e| SyncError::Config(format!("SERVER_ADDRESS {raw_addr} ({e})")))?;

    let state = Arc::new(Mutex::new(AuthorizationCallback::default()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let app = router(Arc::clone(&state));

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    info!("Waiting for {} consent on http://{}/callback", service, addr);
    if webbrowser::open(authorize_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            authorize_url
        );
    }

    let outcome = wait_for_code(state, CALLBACK_TIMEOUT).await;

    let _ = shutdown_tx.send(());
    if let Ok(Err(e)) = server.await {
        warning!("Callback listener stopped with an error: {}", e);
    }

    outcome.map_err(|reason| SyncError::auth(service, reason))
}

async fn wait_for_code(
    state: Arc<Mutex<AuthorizationCallback>>,
    max_wait: Duration,
) -> Result<String, String> {
    use std::time::Instant;

    let start = Instant::now();
    while start.elapsed() < max_wait {
        let lock = state.lock().await;
        if let Some(code) = &lock.code {
            return Ok(code.clone());
        }
        if let Some(reason) = &lock.error {
            return Err(reason.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    Err(format!(
        "no authorization code received within {} seconds",
        max_wait.as_secs()
    ))
}

use axum::response::Json;
use serde_json::{Value, json};

/// Liveness of the callback listener, for checking the redirect URI is
/// reachable before consenting.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "listening",
        "service": env!("CARGO_PKG_NAME"),
        "callback": "/callback",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

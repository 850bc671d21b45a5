//! Configuration management for the library migration.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files: credentials of both services, the
//! local OAuth callback address, the data directory holding tokens and stage
//! snapshots, and the reconciliation knobs.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::{Res, SyncError};

const APP_DIR: &str = "migratify";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory if needed and reads `migratify/.env` from the
/// platform-specific local data directory. A missing `.env` file is not an
/// error: every value can also come from the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/migratify/.env`
/// - macOS: `~/Library/Application Support/migratify/.env`
/// - Windows: `%LOCALAPPDATA%/migratify/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub async fn load_env() -> Res<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    async_fs::create_dir_all(&path).await?;

    path.push(".env");
    if path.is_file() {
        let _ = dotenv::from_path(&path);
    }
    Ok(())
}

fn required(key: &str) -> Res<String> {
    env::var(key).map_err(|_| SyncError::Config(key.to_string()))
}

fn optional(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Returns the directory holding cached tokens and stage snapshots.
///
/// Uses `MIGRATIFY_DATA_DIR` when set, otherwise `migratify/` inside the
/// platform local data directory.
pub fn data_dir() -> PathBuf {
    match env::var("MIGRATIFY_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push(APP_DIR);
            path
        }
    }
}

/// Returns the address the local OAuth callback listener binds to.
///
/// It must be the host and port of both registered redirect URIs,
/// e.g. `127.0.0.1:8888`.
pub fn server_addr() -> Res<String> {
    required("SERVER_ADDRESS")
}

/// Returns the Spotify API client ID used for the PKCE flow.
pub fn spotify_client_id() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application
/// settings, e.g. `http://127.0.0.1:8888/callback`.
pub fn spotify_redirect_uri() -> Res<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Returns the Spotify scopes requested during consent.
///
/// Defaults to the scopes needed to follow artists, save albums and tracks,
/// and read, create and modify playlists.
pub fn spotify_scope() -> String {
    optional(
        "SPOTIFY_API_AUTH_SCOPE",
        "playlist-read-private playlist-modify-private playlist-modify-public user-library-modify user-follow-modify",
    )
}

pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL", "https://accounts.spotify.com/authorize")
}

pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL", "https://accounts.spotify.com/api/token")
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

/// Returns the Deezer application ID.
pub fn deezer_app_id() -> Res<String> {
    required("DEEZER_APP_ID")
}

/// Returns the Deezer application secret.
///
/// # Security Note
///
/// The secret should be kept confidential and never exposed in logs or
/// version control.
pub fn deezer_app_secret() -> Res<String> {
    required("DEEZER_APP_SECRET")
}

pub fn deezer_redirect_uri() -> Res<String> {
    required("DEEZER_REDIRECT_URI")
}

/// Returns the Deezer permissions requested during consent.
///
/// `offline_access` makes Deezer issue a token that never expires.
pub fn deezer_perms() -> String {
    optional("DEEZER_PERMS", "basic_access,email,offline_access,listening_history")
}

pub fn deezer_auth_url() -> String {
    optional("DEEZER_AUTH_URL", "https://connect.deezer.com/oauth/auth.php")
}

pub fn deezer_token_url() -> String {
    optional("DEEZER_TOKEN_URL", "https://connect.deezer.com/oauth/access_token.php")
}

pub fn deezer_apiurl() -> String {
    optional("DEEZER_API_URL", "https://api.deezer.com")
}

/// Returns the override for the "expected absent" title pattern, if any.
pub fn ignore_pattern() -> Option<String> {
    env::var("MIGRATIFY_IGNORE_PATTERN").ok()
}

/// Returns how long to wait before retrying a gateway timeout.
pub fn gateway_retry_delay() -> Duration {
    let secs = env::var("MIGRATIFY_GATEWAY_RETRY_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(10);
    Duration::from_secs(secs)
}

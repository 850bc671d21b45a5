use clap::ValueEnum;

use crate::{
    Res, config, deezer::DeezerClient, management::TOKENS_DIR, spotify::SpotifyClient, success,
};

/// Which side of the migration to authorize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceRole {
    /// Deezer, the library is read from here
    Source,
    /// Spotify, the library is written here
    Destination,
}

/// Obtains and caches a token for one service. A cached token is reused
/// unless `force` is set.
pub async fn auth(role: ServiceRole, force: bool) -> Res<()> {
    let root = config::data_dir();
    match role {
        ServiceRole::Source => {
            let mut deezer = DeezerClient::from_env(&root)?;
            deezer.client_mut().ensure_authenticated(force).await?;
        }
        ServiceRole::Destination => {
            let mut spotify = SpotifyClient::from_env(&root)?;
            spotify.client_mut().ensure_authenticated(force).await?;
        }
    }

    success!("Token cached in {}", root.join(TOKENS_DIR).display());
    Ok(())
}

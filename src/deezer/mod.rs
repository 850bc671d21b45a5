//! # Deezer Integration Module
//!
//! The source side of the migration: authentication and exhaustive
//! enumeration of the user's favourites and playlists.
//!
//! Deezer takes the access token as an `access_token` query parameter and
//! paginates with `limit`/`index` offsets instead of `next` links; a listing
//! ends with the first empty page.

pub mod auth;
mod library;

use std::path::Path;

use crate::{
    Res,
    client::{AuthPlacement, CatalogClient, ClientConfig, ReqwestTransport},
    config,
    management::FileTokenStore,
};

pub use library::PAGE_SIZE;

pub const SERVICE: &str = "deezer";

pub struct DeezerClient {
    client: CatalogClient,
    api_url: String,
}

impl DeezerClient {
    pub fn new(client: CatalogClient, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env(root: &Path) -> Res<Self> {
        let client = CatalogClient::new(
            ClientConfig::new(SERVICE, AuthPlacement::QueryParam("access_token"))
                .with_gateway_retry_delay(config::gateway_retry_delay()),
            Box::new(ReqwestTransport::new()),
            Box::new(auth::DeezerAuthenticator::from_env()?),
            Box::new(FileTokenStore::new(root, SERVICE)),
        );
        Ok(Self::new(client, config::deezer_apiurl()))
    }

    pub fn client_mut(&mut self) -> &mut CatalogClient {
        &mut self.client
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

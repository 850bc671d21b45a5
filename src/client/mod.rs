//! # Authenticated Paginated Client
//!
//! Every call to either catalog service goes through [`CatalogClient::send`],
//! which owns the credential lifecycle and the failure policy:
//!
//! - a missing credential is loaded from the [`TokenStore`] or obtained from
//!   the [`Authenticator`]
//! - a credential within the safety margin of its expiry is refreshed; a
//!   failed refresh forces a full re-authentication
//! - a `401` triggers one forced re-authentication and one retry, unless the
//!   call already re-authenticated
//! - a `504` is retried once after a fixed delay
//! - a `429` is retried after `Retry-After` when the wait is acceptable
//!
//! Every token obtained through authentication or refresh is written back to
//! the store before it is used.
//!
//! [`CatalogClient::drain_paginated`] follows Spotify-style `next` links; the
//! Deezer offset idiom lives with the enumerator in [`crate::deezer`].

mod session;
mod transport;

use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use tokio::time::sleep;

pub use session::{Authenticator, Session, TokenStore};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};

use crate::{Res, SyncError, info, types::Page, warning};

/// Where the access token travels on outbound requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPlacement {
    Bearer,
    QueryParam(&'static str),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub service: &'static str,
    pub placement: AuthPlacement,
    pub expiry_margin: Duration,
    pub gateway_retry_delay: Duration,
    pub max_rate_limit_wait: Duration,
    pub max_rate_limit_retries: u32,
}

impl ClientConfig {
    pub fn new(service: &'static str, placement: AuthPlacement) -> Self {
        Self {
            service,
            placement,
            expiry_margin: Duration::from_secs(2),
            gateway_retry_delay: Duration::from_secs(10),
            max_rate_limit_wait: Duration::from_secs(120),
            max_rate_limit_retries: 3,
        }
    }

    pub fn with_gateway_retry_delay(mut self, delay: Duration) -> Self {
        self.gateway_retry_delay = delay;
        self
    }
}

pub struct CatalogClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
    authenticator: Box<dyn Authenticator>,
    store: Box<dyn TokenStore>,
    session: Session,
}

impl CatalogClient {
    pub fn new(
        config: ClientConfig,
        transport: Box<dyn Transport>,
        authenticator: Box<dyn Authenticator>,
        store: Box<dyn TokenStore>,
    ) -> Self {
        Self {
            config,
            transport,
            authenticator,
            store,
            session: Session::NoToken,
        }
    }

    pub fn service(&self) -> &'static str {
        self.config.service
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Makes sure a usable credential is held, discarding the cached one
    /// first when `force` is set.
    pub async fn ensure_authenticated(&mut self, force: bool) -> Res<()> {
        if force {
            self.reauthenticate().await?;
            return Ok(());
        }
        self.ensure_session().await.map(|_| ())
    }

    /// Sends `request` with the current credential and applies the retry
    /// policy. Any non-2xx response that is not retried becomes an error.
    pub async fn send(&mut self, request: &ApiRequest) -> Res<ApiResponse> {
        let mut reauthenticated = self.ensure_session().await?;
        let mut gateway_retried = false;
        let mut rate_limited = 0;

        loop {
            let response = self.dispatch(request).await?;
            match response.status {
                401 if !reauthenticated => {
                    warning!(
                        "{} rejected the access token, re-authenticating",
                        self.config.service
                    );
                    self.reauthenticate().await?;
                    reauthenticated = true;
                }
                401 => {
                    return Err(SyncError::Unauthorized {
                        url: request.url.clone(),
                    });
                }
                504 if !gateway_retried => {
                    info!(
                        "{} timed out, retrying in {} seconds",
                        self.config.service,
                        self.config.gateway_retry_delay.as_secs()
                    );
                    sleep(self.config.gateway_retry_delay).await;
                    gateway_retried = true;
                }
                504 => {
                    return Err(SyncError::TransientServer {
                        url: request.url.clone(),
                        status: response.status,
                    });
                }
                429 => {
                    let seconds = response.retry_after.unwrap_or(1);
                    if rate_limited >= self.config.max_rate_limit_retries
                        || seconds > self.config.max_rate_limit_wait.as_secs()
                    {
                        return Err(SyncError::RateLimited {
                            url: request.url.clone(),
                            seconds,
                        });
                    }
                    warning!(
                        "{} rate limit reached, waiting {} seconds",
                        self.config.service,
                        seconds
                    );
                    sleep(Duration::from_secs(seconds)).await;
                    rate_limited += 1;
                }
                _ if response.is_success() => return Ok(response),
                status => {
                    return Err(SyncError::Status {
                        url: request.url.clone(),
                        status,
                        body: response.body,
                    });
                }
            }
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&mut self, request: &ApiRequest) -> Res<T> {
        self.send(request).await?.json()
    }

    /// Concatenates the items of `first` and of every page reachable through
    /// its `next` links, in encounter order.
    pub async fn drain_paginated<T: DeserializeOwned>(&mut self, first: Page<T>) -> Res<Vec<T>> {
        if first.items.is_empty() {
            return Ok(Vec::new());
        }

        let mut items = first.items;
        let mut next = first.next;
        while let Some(url) = next {
            let page: Page<T> = self.get_json(&ApiRequest::get(url)).await?;
            items.extend(page.items);
            next = page.next;
        }

        Ok(items)
    }

    /// Returns whether a forced re-authentication happened on the way.
    async fn ensure_session(&mut self) -> Res<bool> {
        let now = Utc::now().timestamp();
        let margin = self.config.expiry_margin;

        match std::mem::take(&mut self.session) {
            Session::NoToken => {
                let token = match self.store.load().await? {
                    Some(token) => token,
                    None => {
                        let token = self.authenticator.authenticate().await?;
                        self.store.save(&token).await?;
                        token
                    }
                };
                self.session = Session::assess(token, now, margin);
            }
            Session::Valid { token, .. } | Session::Expired(token) => {
                self.session = Session::assess(token, now, margin);
            }
        }

        let token = match &self.session {
            Session::Expired(token) => token.clone(),
            _ => return Ok(false),
        };

        match self.authenticator.refresh(&token).await {
            Ok(fresh) => {
                self.store.save(&fresh).await?;
                self.session = Session::valid(fresh);
                Ok(false)
            }
            Err(e) => {
                warning!(
                    "Cannot refresh the {} token ({}), authenticating again",
                    self.config.service,
                    e
                );
                self.reauthenticate().await?;
                Ok(true)
            }
        }
    }

    async fn reauthenticate(&mut self) -> Res<()> {
        self.session = Session::NoToken;
        self.store.invalidate().await?;
        let token = self.authenticator.authenticate().await?;
        self.store.save(&token).await?;
        self.session = Session::valid(token);
        Ok(())
    }

    async fn dispatch(&self, request: &ApiRequest) -> Res<ApiResponse> {
        let token = self
            .session
            .token()
            .ok_or_else(|| SyncError::auth(self.config.service, "no credential held"))?;

        let mut prepared = request.clone();
        match &self.config.placement {
            AuthPlacement::Bearer => prepared.bearer = Some(token.access_token.clone()),
            AuthPlacement::QueryParam(name) => prepared
                .query
                .push((name.to_string(), token.access_token.clone())),
        }

        self.transport.execute(prepared).await
    }
}

use std::time::Duration;

use async_trait::async_trait;

use crate::{Res, types::Token};

/// Produces credentials for one service.
///
/// `authenticate` may suspend until the user finishes the consent flow in a
/// browser.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self) -> Res<Token>;
    async fn refresh(&self, token: &Token) -> Res<Token>;
}

/// Durable cache of the last credential of one service.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Res<Option<Token>>;
    async fn save(&self, token: &Token) -> Res<()>;
    async fn invalidate(&self) -> Res<()>;
}

/// Credential state of a [`super::CatalogClient`].
///
/// Refresh and re-authentication move the client between these states
/// explicitly; a request is only dispatched from `Valid`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    NoToken,
    Valid {
        token: Token,
        expires_at: Option<i64>,
    },
    Expired(Token),
}

impl Session {
    /// Classifies `token` at `now`; a token inside `margin` of its expiry is
    /// already treated as expired.
    pub fn assess(token: Token, now: i64, margin: Duration) -> Self {
        match token.expires_at() {
            Some(expires_at) if now >= expires_at - margin.as_secs() as i64 => {
                Session::Expired(token)
            }
            expires_at => Session::Valid { token, expires_at },
        }
    }

    pub fn valid(token: Token) -> Self {
        let expires_at = token.expires_at();
        Session::Valid { token, expires_at }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Session::NoToken => None,
            Session::Valid { token, .. } => Some(token),
            Session::Expired(token) => Some(token),
        }
    }
}

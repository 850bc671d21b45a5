use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::{
    Res, SyncError, client::Authenticator, config, deezer::SERVICE,
    server::capture_authorization_code, success, types::Token,
};

/// Deezer's app-id/secret code exchange.
///
/// Deezer has no refresh grant. Tokens requested with `offline_access` never
/// expire; any other token is simply authenticated again once it lapses.
pub struct DeezerAuthenticator {
    http: Client,
    app_id: String,
    app_secret: String,
    redirect_uri: String,
    perms: String,
    auth_url: String,
    token_url: String,
}

impl DeezerAuthenticator {
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        perms: impl Into<String>,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            redirect_uri: redirect_uri.into(),
            perms: perms.into(),
            auth_url: auth_url.into(),
            token_url: token_url.into(),
        }
    }

    pub fn from_env() -> Res<Self> {
        Ok(Self::new(
            config::deezer_app_id()?,
            config::deezer_app_secret()?,
            config::deezer_redirect_uri()?,
            config::deezer_perms(),
            config::deezer_auth_url(),
            config::deezer_token_url(),
        ))
    }

    pub fn authorize_url(&self) -> Res<String> {
        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("app_id", self.app_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("perms", self.perms.as_str()),
            ],
        )
        .map_err(|e| SyncError::Config(format!("DEEZER_AUTH_URL ({e})")))?;
        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> Res<Token> {
        let response = self
            .http
            .get(&self.token_url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("secret", self.app_secret.as_str()),
                ("code", code),
                ("output", "json"),
            ])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        parse_token_response(&body, Utc::now().timestamp()).ok_or_else(|| {
            SyncError::auth(
                SERVICE,
                format!("cannot retrieve access token: {status} {body}"),
            )
        })
    }
}

/// Reads `{"access_token": "...", "expires": N}`. Deezer answers a rejected
/// code with plain text such as `wrong code`, which yields `None`.
///
/// `expires` is sometimes a string and is `0` for tokens that never expire.
pub fn parse_token_response(body: &str, obtained_at: i64) -> Option<Token> {
    let json: Value = serde_json::from_str(body).ok()?;
    let access_token = json["access_token"].as_str()?.to_string();
    let expires = match &json["expires"] {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    };

    Some(Token {
        access_token,
        refresh_token: None,
        scope: None,
        expires_in: expires.filter(|secs| *secs > 0),
        obtained_at,
    })
}

#[async_trait]
impl Authenticator for DeezerAuthenticator {
    async fn authenticate(&self) -> Res<Token> {
        let authorize_url = self.authorize_url()?;
        let code = capture_authorization_code(SERVICE, &authorize_url).await?;
        let token = self.exchange_code(&code).await?;
        success!("Deezer authentication successful!");
        Ok(token)
    }

    async fn refresh(&self, _token: &Token) -> Res<Token> {
        Err(SyncError::auth(SERVICE, "refreshing tokens is not supported"))
    }
}

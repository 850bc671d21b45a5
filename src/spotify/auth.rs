use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    Res, SyncError, client::Authenticator, config, server::capture_authorization_code,
    spotify::SERVICE, success, types::Token, utils,
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_token(self, previous_refresh: Option<&str>) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh.map(str::to_string)),
            scope: self.scope,
            expires_in: Some(self.expires_in.unwrap_or(3600)),
            obtained_at: Utc::now().timestamp(),
        }
    }
}

/// Authorization Code flow with PKCE against the Spotify accounts service.
///
/// No client secret is involved: the code verifier generated for each
/// consent proves that the same client is completing the exchange.
pub struct SpotifyAuthenticator {
    http: Client,
    client_id: String,
    redirect_uri: String,
    scope: String,
    auth_url: String,
    token_url: String,
}

impl SpotifyAuthenticator {
    pub fn new(
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        scope: impl Into<String>,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            scope: scope.into(),
            auth_url: auth_url.into(),
            token_url: token_url.into(),
        }
    }

    pub fn from_env() -> Res<Self> {
        Ok(Self::new(
            config::spotify_client_id()?,
            config::spotify_redirect_uri()?,
            config::spotify_scope(),
            config::spotify_apiauth_url(),
            config::spotify_apitoken_url(),
        ))
    }

    /// Builds the consent URL for one PKCE challenge.
    pub fn authorize_url(&self, code_challenge: &str) -> Res<String> {
        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("code_challenge", code_challenge),
                ("code_challenge_method", "S256"),
                ("scope", self.scope.as_str()),
            ],
        )
        .map_err(|e| SyncError::Config(format!("SPOTIFY_API_AUTH_URL ({e})")))?;
        Ok(url.into())
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Res<TokenResponse> {
        let response = self.http.post(&self.token_url).form(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SyncError::auth(
                SERVICE,
                format!("token endpoint returned {status}: {body}"),
            ));
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn exchange_code_pkce(&self, code: &str, verifier: &str) -> Res<Token> {
        let response = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("client_id", &self.client_id),
                ("code", code),
                ("code_verifier", verifier),
                ("redirect_uri", &self.redirect_uri),
            ])
            .await?;
        Ok(response.into_token(None))
    }
}

#[async_trait]
impl Authenticator for SpotifyAuthenticator {
    async fn authenticate(&self) -> Res<Token> {
        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);
        let authorize_url = self.authorize_url(&code_challenge)?;

        let code = capture_authorization_code(SERVICE, &authorize_url).await?;
        let token = self.exchange_code_pkce(&code, &code_verifier).await?;
        success!("Spotify authentication successful!");
        Ok(token)
    }

    /// Spotify may omit `refresh_token` from the response, in which case
    /// the previous one stays valid.
    async fn refresh(&self, token: &Token) -> Res<Token> {
        let refresh_token = token
            .refresh_token
            .as_deref()
            .ok_or_else(|| SyncError::auth(SERVICE, "no refresh token cached"))?;

        let response = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", &self.client_id),
            ])
            .await?;
        Ok(response.into_token(Some(refresh_token)))
    }
}

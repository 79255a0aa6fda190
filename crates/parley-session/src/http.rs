//! Certificate-style authentication over HTTP.
//!
//! The platform exposes two endpoints, one per token:
//!
//! ```text
//! POST {session_auth_url}/sessionauth/v1/authenticate  → {"name": "sessionToken",    "token": "..."}
//! POST {key_auth_url}/keyauth/v1/authenticate          → {"name": "keyManagerToken", "token": "..."}
//! ```
//!
//! The client proves its identity at the TLS layer (a client certificate
//! configured on the `reqwest::Client`), so the requests have no body.
//! Both exchanges run concurrently and the pair is only returned when both
//! succeed.

use std::time::Duration;

use parley_protocol::{Codec, Credentials, JsonCodec, Token, wire::AuthToken};
use serde::Deserialize;

use crate::{Authenticator, SessionError};

/// Where the two authentication endpoints live.
///
/// On most deployments both are the pod URL; the key manager can sit on a
/// separate host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpAuthConfig {
    pub session_auth_url: String,
    pub key_auth_url: String,
    /// Per-exchange timeout when [`HttpAuthenticator::new`] builds the
    /// client.
    pub timeout: Duration,
}

impl Default for HttpAuthConfig {
    fn default() -> Self {
        Self {
            session_auth_url: String::new(),
            key_auth_url: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpAuthConfig {
    /// Both endpoints on the same host.
    pub fn single_host(url: &str) -> Self {
        Self {
            session_auth_url: url.to_owned(),
            key_auth_url: url.to_owned(),
            ..Default::default()
        }
    }
}

/// An [`Authenticator`] backed by the platform's authentication endpoints.
#[derive(Debug, Clone)]
pub struct HttpAuthenticator {
    client: reqwest::Client,
    session_url: String,
    key_url: String,
}

impl HttpAuthenticator {
    /// Builds an authenticator with a plain client and the configured
    /// timeout.
    ///
    /// # Errors
    /// [`SessionError::Unreachable`] if the TLS backend can't be
    /// initialized.
    pub fn new(config: &HttpAuthConfig) -> Result<Self, SessionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SessionError::Unreachable(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// Builds an authenticator around a client that already carries the
    /// caller's identity (client certificate, proxy settings).
    pub fn with_client(client: reqwest::Client, config: &HttpAuthConfig) -> Self {
        Self {
            client,
            session_url: format!(
                "{}/sessionauth/v1/authenticate",
                config.session_auth_url.trim_end_matches('/')
            ),
            key_url: format!(
                "{}/keyauth/v1/authenticate",
                config.key_auth_url.trim_end_matches('/')
            ),
        }
    }

    async fn fetch_token(&self, url: &str) -> Result<Token, SessionError> {
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| SessionError::Unreachable(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::AuthFailed(format!(
                "{url} answered {}",
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SessionError::Unreachable(format!("{url}: {e}")))?;
        let token: AuthToken = JsonCodec
            .decode(&body)
            .map_err(|e| SessionError::InvalidResponse(format!("{url}: {e}")))?;

        match token.token {
            Some(raw) if !raw.is_empty() => {
                tracing::debug!(url, name = token.name.as_deref(), "token obtained");
                Ok(Token::new(raw))
            }
            _ => Err(SessionError::InvalidResponse(format!(
                "{url}: response carries no token"
            ))),
        }
    }
}

impl Authenticator for HttpAuthenticator {
    async fn authenticate(&self) -> Result<Credentials, SessionError> {
        let (session, signing) = tokio::try_join!(
            self.fetch_token(&self.session_url),
            self.fetch_token(&self.key_url),
        )?;
        Ok(Credentials::new(session, signing))
    }
}

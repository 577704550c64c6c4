//! # HTTP Transport
//!
//! Thin wrapper around `reqwest` that knows the server origin, attaches the
//! bearer token, and turns responses into typed results.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ApiClient::get/post/put/delete(path)                                  │
//! │       │                                                                 │
//! │       ├── tokens.require() ── None ──► Err(MissingToken), NOT sent      │
//! │       │                                                                 │
//! │       ├── base_url.join(path)  + Authorization: Bearer <token>          │
//! │       │                                                                 │
//! │       ├── send ── no response ──► Err(Transport)                        │
//! │       │                                                                 │
//! │       ├── non-2xx ──► Err(Status { status, message })                   │
//! │       │                                                                 │
//! │       └── 2xx ──► serde_json::from_slice ── bad shape ──► Err(Decode)   │
//! │                                                                         │
//! │  No retries, no client-side timeout beyond reqwest's defaults.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Instant;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::DepotConfig;
use crate::error::{ClientError, ClientResult};
use crate::token::{EnvTokenStore, MemoryTokenStore, TokenAccessor};

/// Shared HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenAccessor,
}

/// Error body shape the server uses for failures, when it sends one.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: TokenAccessor) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("depot-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// Builds a client from configuration: origin, token file, session env var.
    pub fn from_config(config: &DepotConfig) -> ClientResult<Self> {
        let tokens = match config.token_path() {
            Some(path) => TokenAccessor::from_paths(path, config.session.token_env.clone()),
            None => {
                warn!("No data directory for the token file; the session will not persist");
                TokenAccessor::new(
                    Arc::new(MemoryTokenStore::new()),
                    Arc::new(EnvTokenStore::new(config.session.token_env.clone())),
                )
            }
        };
        Self::new(config.base_url(), tokens)
    }

    pub fn tokens(&self) -> &TokenAccessor {
        &self.tokens
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Starts a request carrying the bearer token; fails before anything is
    /// sent when there is no token.
    fn authed(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let token = self.tokens.require()?;
        let url = self.url(path)?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    fn public(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.url(path)?;
        Ok(self.http.request(method, url))
    }

    // =========================================================================
    // Authenticated verbs
    // =========================================================================

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<T> {
        let request = self.authed(Method::GET, path)?.query(query);
        let response = self.send("GET", path, request).await?;
        decode(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let request = self.authed(Method::POST, path)?.json(body);
        let response = self.send("POST", path, request).await?;
        decode(response).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let request = self.authed(Method::PUT, path)?.json(body);
        let response = self.send("PUT", path, request).await?;
        decode(response).await
    }

    /// DELETE; any 2xx body is ignored.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.authed(Method::DELETE, path)?;
        self.send("DELETE", path, request).await?;
        Ok(())
    }

    // =========================================================================
    // Unauthenticated verbs (login, register, password reset)
    // =========================================================================

    pub async fn post_public<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.public(Method::POST, path)?.json(body);
        let response = self.send("POST", path, request).await?;
        decode(response).await
    }

    /// Like [`Self::post_public`] for endpoints whose body the console ignores.
    pub async fn post_public_ignored<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<()> {
        let request = self.public(Method::POST, path)?.json(body);
        self.send("POST", path, request).await?;
        Ok(())
    }

    async fn send(&self, method: &str, path: &str, request: RequestBuilder) -> ClientResult<Response> {
        let start = Instant::now();
        debug!(method, path, "Sending request");

        let response = request.send().await.map_err(|e| {
            warn!(method, path, error = %e, "Request failed");
            ClientError::Transport(e.to_string())
        })?;

        let status = response.status();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            warn!(method, path, status = status.as_u16(), elapsed_ms, %message, "Server returned an error");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        debug!(method, path, status = status.as_u16(), elapsed_ms, "Request completed");
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message.or(parsed.msg).or(parsed.error),
        Err(_) => Some(body.trim().to_string()),
    }
}

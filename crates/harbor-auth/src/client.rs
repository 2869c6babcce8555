//! HTTP client for the harbor auth service
//!
//! Every operation is one POST with a JSON body:
//! 1. Validate inputs locally (no request on failure)
//! 2. POST to `<base_url><path>` with `Content-Type: application/json`
//! 3. Any status other than 200 fails with the status line; the body is not read
//! 4. Read the body and parse it leniently (see `models`)
//!
//! No retries and no token caching. The base URL is the only state the
//! client keeps, so one instance can be shared across tasks.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use auth::{Auth, AuthError, LoginResponse, Result};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::constants::{BACKEND_ID, CHECK_TOKEN_PATH, DESTROY_TOKEN_PATH, GET_TOKEN_PATH};
use crate::models::{self, LoginRequest, TokenRequest};
use crate::validate;

/// Client for a harbor auth service rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct HarborAuthClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

/// Builder for `HarborAuthClient` when a timeout or a shared
/// `reqwest::Client` is needed.
#[derive(Debug)]
pub struct HarborAuthClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl HarborAuthClientBuilder {
    /// Per-request deadline. Without one a request waits as long as the
    /// service keeps the connection open.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reuse an existing connection pool.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Fails with `InvalidBaseUrl` when the base URL is empty. The URL is
    /// otherwise not checked; a malformed one surfaces as a transport error
    /// on first use.
    pub fn build(self) -> Result<HarborAuthClient> {
        if self.base_url.is_empty() {
            return Err(AuthError::InvalidBaseUrl);
        }
        Ok(HarborAuthClient {
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            client: self.client.unwrap_or_default(),
            timeout: self.timeout,
        })
    }
}

impl HarborAuthClient {
    /// Client with no timeout and a fresh connection pool.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder(base_url).build()
    }

    pub fn builder(base_url: impl Into<String>) -> HarborAuthClientBuilder {
        HarborAuthClientBuilder {
            base_url: base_url.into(),
            timeout: None,
            client: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange credentials for a token via `GET_TOKEN_PATH`.
    ///
    /// The password length is checked before the username.
    pub async fn request_token(&self, username: &str, password: &str) -> Result<LoginResponse> {
        validate::password_length(password)?;
        validate::username(username)?;

        let body = self
            .post(GET_TOKEN_PATH, &LoginRequest { username, password })
            .await?;
        Ok(models::parse_login(&body))
    }

    /// Revoke `token` via `DESTROY_TOKEN_PATH`.
    pub async fn destroy_token(&self, username: &str, token: &str) -> Result<bool> {
        self.token_call(DESTROY_TOKEN_PATH, username, token).await
    }

    /// Check `token` via `CHECK_TOKEN_PATH`. Same payload as `destroy_token`.
    pub async fn check_token(&self, username: &str, token: &str) -> Result<bool> {
        self.token_call(CHECK_TOKEN_PATH, username, token).await
    }

    async fn token_call(&self, path: &str, username: &str, token: &str) -> Result<bool> {
        validate::username(username)?;
        validate::token(token)?;

        let body = self.post(path, &TokenRequest { username, token }).await?;
        Ok(models::parse_status(&body).success)
    }

    /// POST `payload` as JSON and return the raw body of a 200 response.
    async fn post<T: Serialize + Sync>(&self, path: &str, payload: &T) -> Result<Vec<u8>> {
        let endpoint = format!("{}{path}", self.base_url);

        let mut request = self.client.post(&endpoint).json(payload);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|source| {
            debug!(endpoint = %endpoint, error = %source, "auth request failed");
            AuthError::Transport {
                endpoint: endpoint.clone(),
                source,
            }
        })?;

        let status = response.status();
        debug!(endpoint = %endpoint, status = status.as_u16(), "auth service responded");
        if status != StatusCode::OK {
            return Err(AuthError::Status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| AuthError::Read { endpoint, source })?;
        Ok(body.to_vec())
    }
}

impl Auth for HarborAuthClient {
    fn id(&self) -> &str {
        BACKEND_ID
    }

    fn login<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<LoginResponse>> + Send + 'a>> {
        Box::pin(self.request_token(username, password))
    }

    fn logout<'a>(
        &'a self,
        username: &'a str,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + 'a>> {
        Box::pin(self.destroy_token(username, token))
    }

    fn is_authenticated<'a>(
        &'a self,
        username: &'a str,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + 'a>> {
        Box::pin(self.check_token(username, token))
    }
}

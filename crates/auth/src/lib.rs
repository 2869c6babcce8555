//! Authentication backend abstraction
//!
//! Defines the `Auth` trait that callers program against, independent of
//! which identity service answers. `harbor-auth` provides the remote
//! registry backend; other backends implement the same five operations.
//!
//! `get_user` and `get_token` are part of the contract for callers that
//! expect a richer backend. Backends without them return
//! `AuthError::NotImplemented`.

pub mod error;

pub use error::{AuthError, Result, ValidationError};
pub use reqwest::StatusCode;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Outcome of a successful login round trip.
///
/// A 200 response whose body lacks or mistypes a field yields the zero
/// value for that field, so `success` must still be checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub success: bool,
}

/// Outcome of a logout or token check round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
}

/// Capability set shared by every authentication backend.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility (`Arc<dyn Auth>`).
/// Implementations hold no per-user state: each call stands alone.
pub trait Auth: Send + Sync {
    /// Identifier for logging (e.g. "harbor")
    fn id(&self) -> &str;

    /// Exchange a username and password for a token.
    fn login<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<LoginResponse>> + Send + 'a>>;

    /// Revoke a token. Returns the service's `success` flag.
    fn logout<'a>(
        &'a self,
        username: &'a str,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + 'a>>;

    /// Ask whether a token is still valid. Read-only on the service side.
    fn is_authenticated<'a>(
        &'a self,
        username: &'a str,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool>> + Send + 'a>>;

    fn get_user(&self) -> Result<()> {
        Err(AuthError::NotImplemented("GetUser"))
    }

    fn get_token(&self) -> Result<()> {
        Err(AuthError::NotImplemented("GetToken"))
    }
}

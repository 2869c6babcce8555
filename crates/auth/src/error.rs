//! Error types for authentication backends

use reqwest::StatusCode;

/// Local precondition failures, raised before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Password is either less than the minimum or over the maximum number of characters")]
    PasswordLength,

    #[error("Usernames must be alphabetical")]
    UsernameNotAlphabetic,

    #[error("Empty token")]
    EmptyToken,
}

/// Errors from authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any status other than 200. Codes without a standard reason phrase
    /// display the number alone.
    #[error("Invalid Status Code: {}", status_line(.0))]
    Status(StatusCode),

    #[error("reading response from {endpoint} failed: {source}")]
    Read {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0} error: not implemented")]
    NotImplemented(&'static str),

    #[error("auth service base URL is empty")]
    InvalidBaseUrl,
}

fn status_line(status: &StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

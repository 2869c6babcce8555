//! Local input checks run before any request leaves the process

use auth::ValidationError;

use crate::constants::{PASSWORD_MAX_LEN, PASSWORD_MIN_LEN};

/// Password length, measured in bytes, must fall within the inclusive bounds.
pub fn password_length(password: &str) -> Result<(), ValidationError> {
    if (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&password.len()) {
        Ok(())
    } else {
        Err(ValidationError::PasswordLength)
    }
}

/// Usernames are ASCII letters only. An empty username passes; the service
/// rejects it.
pub fn username(username: &str) -> Result<(), ValidationError> {
    if username.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ValidationError::UsernameNotAlphabetic)
    }
}

pub fn token(token: &str) -> Result<(), ValidationError> {
    if token.is_empty() {
        Err(ValidationError::EmptyToken)
    } else {
        Ok(())
    }
}

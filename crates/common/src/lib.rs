//! Shared types for the harbor auth workspace

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;

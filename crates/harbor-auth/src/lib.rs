//! Client for the harbor registry auth service
//!
//! Implements `auth::Auth` over the service's three JSON endpoints:
//! 1. `client::HarborAuthClient::request_token` posts credentials to `GET_TOKEN_PATH`
//! 2. `check_token` asks `CHECK_TOKEN_PATH` whether a token is still valid
//! 3. `destroy_token` revokes it via `DESTROY_TOKEN_PATH`
//!
//! Inputs are validated locally first; see `validate`.

pub mod client;
pub mod constants;
pub mod models;
pub mod validate;

pub use client::{HarborAuthClient, HarborAuthClientBuilder};
pub use constants::*;

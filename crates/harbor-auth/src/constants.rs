//! Harbor auth service endpoints and input bounds

/// Exchanges username + password for a token
pub const GET_TOKEN_PATH: &str = "/v1/auth/gettoken";

/// Revokes a token
pub const DESTROY_TOKEN_PATH: &str = "/v1/auth/destroytoken";

/// Reports whether a token is still valid
pub const CHECK_TOKEN_PATH: &str = "/v1/auth/checktoken";

/// Password length bounds in bytes, both inclusive.
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 20;

/// Identifier reported through `Auth::id`.
pub const BACKEND_ID: &str = "harbor";

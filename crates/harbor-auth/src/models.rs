//! Request and response payloads for the harbor auth endpoints
//!
//! Responses are parsed leniently: a 200 body that is not JSON, or that
//! lacks or mistypes a field, resolves each affected field to its zero
//! value instead of failing the call. Keys match exactly first, then
//! case-insensitively (`"Token"` fills `token`).

use auth::{LoginResponse, StatusResponse};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Body for `GET_TOKEN_PATH`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body shared by `DESTROY_TOKEN_PATH` and `CHECK_TOKEN_PATH`.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub token: &'a str,
}

pub fn parse_login(body: &[u8]) -> LoginResponse {
    let Some(value) = parse_body(body) else {
        return LoginResponse::default();
    };
    LoginResponse {
        token: field(&value, "token")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        success: success_flag(&value),
    }
}

pub fn parse_status(body: &[u8]) -> StatusResponse {
    StatusResponse {
        success: parse_body(body).as_ref().is_some_and(success_flag),
    }
}

fn success_flag(value: &Value) -> bool {
    field(value, "success")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn field<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    let object = value.as_object()?;
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

fn parse_body(body: &[u8]) -> Option<Value> {
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, len = body.len(), "ignoring unparseable auth response body");
            None
        }
    }
}

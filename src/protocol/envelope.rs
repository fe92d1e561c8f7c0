//! Response classification and `{code, msg, data}` envelope unwrapping.
//!
//! Both transports hand the raw status, `Retry-After` header and body here so
//! the async and blocking paths classify responses identically.

use crate::{Error, Result};
use serde_json::Value;

/// Retry hint used when a 429 carries no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Turn an HTTP response into the unwrapped payload or a terminal error.
pub fn parse_response(status: u16, retry_after: Option<&str>, body: &[u8]) -> Result<Value> {
    if status == 429 {
        let retry_after = retry_after
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(Error::RateLimit {
            message: format!("Rate limit exceeded. Retry after {} seconds", retry_after),
            retry_after,
        });
    }

    if status >= 400 {
        let body = error_body(body);
        let message = error_message(&body).unwrap_or_else(|| format!("HTTP {}", status));
        return Err(api_error(status, message, body));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let json: Value = serde_json::from_slice(body)?;
    unwrap(json)
}

/// Unwrap the backend envelope.
///
/// A top-level object with a `data` key is an envelope: a present `code` other
/// than 200 is an error, otherwise `data` is returned. Anything else is
/// returned unchanged.
///
/// Codes that do not fit an HTTP status (negative, above `u16::MAX`,
/// non-numeric) are reported as status 500; the whole envelope, raw `code`
/// included, is kept in [`Error::Api`]'s `body`.
pub fn unwrap(json: Value) -> Result<Value> {
    match json {
        Value::Object(mut map) if map.contains_key("data") => {
            if let Some(code) = map.get("code").filter(|c| !c.is_null()) {
                let code = code
                    .as_u64()
                    .or_else(|| code.as_str().and_then(|s| s.trim().parse().ok()))
                    .unwrap_or(500);
                if code != 200 {
                    let message = map
                        .get("msg")
                        .and_then(Value::as_str)
                        .unwrap_or("API returned error")
                        .to_string();
                    let status = u16::try_from(code).unwrap_or(500);
                    return Err(api_error(status, message, Value::Object(map)));
                }
            }
            Ok(map.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}

fn error_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

fn error_message(body: &Value) -> Option<String> {
    ["error", "msg", "message"]
        .iter()
        .find_map(|k| body.get(*k).and_then(Value::as_str))
        .map(String::from)
}

fn api_error(status: u16, message: String, body: Value) -> Error {
    match status {
        401 => Error::Authentication { message },
        402 => Error::InsufficientCredits {
            credits_required: credit_field(&body, "credits_required"),
            credits_available: credit_field(&body, "credits_available"),
            message,
        },
        _ => Error::Api {
            status,
            message,
            body,
        },
    }
}

fn credit_field(body: &Value, key: &str) -> Option<u64> {
    body.get(key)
        .or_else(|| body.get("data").and_then(|d| d.get(key)))
        .and_then(Value::as_u64)
}

//! Error taxonomy shared by every provider profile

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Classified error kinds, independent of backend vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed call (JSON-RPC `-32600`/`-32602`).
    BadRequest,
    /// Method or resource absent (JSON-RPC `-32601`).
    NotFound,
    Forbidden,
    MethodNotAllowed,
    /// Backend throttling (JSON-RPC `-32005`, explorer rate-limit text).
    RateLimited,
    /// Default bucket: transport failures, malformed payloads, unmapped codes.
    Unknown,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad-request",
            ErrorKind::NotFound => "not-found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::MethodNotAllowed => "method-not-allowed",
            ErrorKind::RateLimited => "rate-limited",
            ErrorKind::Unknown => "unknown",
        }
    }

    /// Conventional HTTP-style code for the kind.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Forbidden => 403,
            ErrorKind::MethodNotAllowed => 405,
            ErrorKind::RateLimited => 429,
            ErrorKind::Unknown => 500,
        }
    }

    /// Map a JSON-RPC error code. Backends disagree on whether the code is a
    /// number or a quoted string, so both wire forms are accepted; anything
    /// unparseable lands in [`ErrorKind::Unknown`].
    pub fn from_rpc_code(code: &Value) -> Self {
        let code = match code {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse::<i64>().ok(),
            _ => None,
        };
        match code {
            Some(-32600) | Some(-32602) => ErrorKind::BadRequest,
            Some(-32601) => ErrorKind::NotFound,
            Some(-32005) => ErrorKind::RateLimited,
            _ => ErrorKind::Unknown,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure from one provider call.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct ProxyError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ProxyError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Advisory error hook, invoked synchronously with `(kind, message)` before
/// the failing call returns its `Err`. At most one hook is active per client.
pub type ErrorHook = Box<dyn Fn(ErrorKind, &str) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_code_mapping() {
        assert_eq!(ErrorKind::from_rpc_code(&json!(-32600)), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_rpc_code(&json!(-32602)), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_rpc_code(&json!(-32601)), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_rpc_code(&json!(-32005)), ErrorKind::RateLimited);
        assert_eq!(ErrorKind::from_rpc_code(&json!(-32000)), ErrorKind::Unknown);
    }

    #[test]
    fn test_string_code_mapping() {
        assert_eq!(
            ErrorKind::from_rpc_code(&json!("-32005")),
            ErrorKind::RateLimited
        );
        assert_eq!(
            ErrorKind::from_rpc_code(&json!("not a code")),
            ErrorKind::Unknown
        );
        assert_eq!(ErrorKind::from_rpc_code(&json!(null)), ErrorKind::Unknown);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::RateLimited.status_code(), 429);
        assert_eq!(ErrorKind::Unknown.status_code(), 500);
    }
}

//! Response envelope decoding: payload in, `result` out or a classified error

use serde_json::Value;

use super::error::ErrorKind;

/// The two response envelope families a backend can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    /// `{"result": ...}` or `{"error": {"code", "message"}}`.
    JsonRpc,
    /// `{"status", "message", "result"}`; proxy actions pass JSON-RPC errors
    /// through unchanged, so both vocabularies can appear.
    Explorer,
}

/// Extract the `result` field or classify the failure. Pure; the caller
/// decides what to do with the classification (hook, log, return).
pub fn decode_envelope(
    kind: EnvelopeKind,
    payload: &Value,
) -> Result<Value, (ErrorKind, String)> {
    let Some(object) = payload.as_object() else {
        return Err((ErrorKind::Unknown, format!("unexpected payload: {payload}")));
    };

    if kind == EnvelopeKind::Explorer {
        if let Some("0") = object.get("status").and_then(Value::as_str) {
            return Err(classify_explorer_failure(payload));
        }
    }

    if let Some(error) = object.get("error") {
        if !error.is_null() {
            return Err(classify_rpc_error(error));
        }
    }

    match object.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err((ErrorKind::Unknown, format!("missing result field: {payload}"))),
    }
}

/// Explorer convention: `status == "0"` with the detail in a textual
/// `result`. Rate limiting is only ever signalled through that text.
fn classify_explorer_failure(payload: &Value) -> (ErrorKind, String) {
    match payload.get("result") {
        Some(Value::String(text)) => {
            let kind = if text.contains("rate") {
                ErrorKind::RateLimited
            } else {
                ErrorKind::Unknown
            };
            (kind, text.clone())
        }
        _ => (ErrorKind::Unknown, format!("explorer error: {payload}")),
    }
}

fn classify_rpc_error(error: &Value) -> (ErrorKind, String) {
    match error {
        Value::String(text) => (ErrorKind::Unknown, text.clone()),
        Value::Object(fields) => {
            let kind = fields
                .get("code")
                .map(ErrorKind::from_rpc_code)
                .unwrap_or(ErrorKind::Unknown);
            let message = fields
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            (kind, message)
        }
        other => (ErrorKind::Unknown, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_passes_through() {
        let payload = json!({"jsonrpc": "2.0", "id": 1, "result": "0x2a"});
        let result = decode_envelope(EnvelopeKind::JsonRpc, &payload).unwrap();
        assert_eq!(result, json!("0x2a"));
    }

    #[test]
    fn test_null_result_is_a_result() {
        let payload = json!({"jsonrpc": "2.0", "id": 1, "result": null});
        let result = decode_envelope(EnvelopeKind::JsonRpc, &payload).unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn test_rpc_error_codes() {
        let rate_limited = json!({"error": {"code": -32005, "message": "too many requests"}});
        let (kind, message) = decode_envelope(EnvelopeKind::JsonRpc, &rate_limited).unwrap_err();
        assert_eq!(kind, ErrorKind::RateLimited);
        assert_eq!(message, "too many requests");

        let bad_method = json!({"error": {"code": "-32601", "message": "no such method"}});
        let (kind, _) = decode_envelope(EnvelopeKind::JsonRpc, &bad_method).unwrap_err();
        assert_eq!(kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_explorer_rate_limit_text() {
        let payload = json!({"status": "0", "message": "NOTOK", "result": "Max rate limit reached"});
        let (kind, message) = decode_envelope(EnvelopeKind::Explorer, &payload).unwrap_err();
        assert_eq!(kind, ErrorKind::RateLimited);
        assert_eq!(message, "Max rate limit reached");

        let payload = json!({"status": "0", "message": "NOTOK", "result": "Invalid API Key"});
        let (kind, _) = decode_envelope(EnvelopeKind::Explorer, &payload).unwrap_err();
        assert_eq!(kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_explorer_passes_rpc_errors_through() {
        let payload = json!({"error": {"code": -32602, "message": "invalid argument"}});
        let (kind, _) = decode_envelope(EnvelopeKind::Explorer, &payload).unwrap_err();
        assert_eq!(kind, ErrorKind::BadRequest);
    }

    #[test]
    fn test_malformed_payloads() {
        let (kind, _) = decode_envelope(EnvelopeKind::JsonRpc, &json!("oops")).unwrap_err();
        assert_eq!(kind, ErrorKind::Unknown);

        let (kind, _) = decode_envelope(EnvelopeKind::JsonRpc, &json!({"id": 1})).unwrap_err();
        assert_eq!(kind, ErrorKind::Unknown);

        let (kind, message) =
            decode_envelope(EnvelopeKind::JsonRpc, &json!({"error": "out of gas"})).unwrap_err();
        assert_eq!(kind, ErrorKind::Unknown);
        assert_eq!(message, "out of gas");
    }
}

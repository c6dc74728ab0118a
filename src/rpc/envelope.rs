//! JSON-RPC response envelope unwrapping.
//!
//! A Better BibTeX response is `{"jsonrpc": "2.0", "result": ...}` or
//! `{"jsonrpc": "2.0", "error": {"message": ...}}`. Two quirks are handled
//! here so callers only ever see plain payloads:
//!
//! - `item.export` answers with `[status, content-type, body]`, where
//!   `body` is itself a JSON document in a string (see [`LegacyPayload`]).
//! - export bodies wrap their records as `{"items": [...]}`.

use serde_json::Value;

use super::RpcError;

/// Shape of a `result` value that needs a second decoding pass.
///
/// Compatibility shim for `item.export`, which returns a list starting with
/// an integer status code and carrying the real payload as a JSON string in
/// the third position. This is not a general JSON-RPC rule.
#[derive(Debug, PartialEq)]
enum LegacyPayload<'a> {
    /// `[int, _, "<json>"]`
    Encoded(&'a str),
    /// Starts with an integer but the third element is missing or not a string
    Malformed,
    /// Anything else: use the value directly
    NotLegacy,
}

impl<'a> LegacyPayload<'a> {
    fn classify(payload: &'a Value) -> Self {
        let Some(items) = payload.as_array() else {
            return Self::NotLegacy;
        };
        let starts_with_integer = items
            .first()
            .is_some_and(|first| first.is_i64() || first.is_u64());
        if !starts_with_integer {
            return Self::NotLegacy;
        }
        match items.get(2).and_then(Value::as_str) {
            Some(encoded) => Self::Encoded(encoded),
            None => Self::Malformed,
        }
    }
}

/// Unwraps a decoded response body into its payload.
///
/// # Errors
///
/// Returns [`RpcError::Remote`] when the body carries an `error` object and
/// [`RpcError::InvalidResponse`] when it has no `result`, or a legacy
/// payload cannot be decoded.
pub(crate) fn unwrap_response(method: &str, body: Value) -> Result<Value, RpcError> {
    let Value::Object(mut envelope) = body else {
        return Err(RpcError::invalid_response(
            method,
            "response is not a JSON object",
        ));
    };

    if let Some(error) = envelope.get("error") {
        return Err(RpcError::remote(method, &error_message(error)));
    }

    let Some(result) = envelope.remove("result") else {
        return Err(RpcError::invalid_response(
            method,
            "response has neither 'result' nor 'error'",
        ));
    };

    let payload = match LegacyPayload::classify(&result) {
        LegacyPayload::NotLegacy => result,
        LegacyPayload::Encoded(encoded) => serde_json::from_str(encoded).map_err(|error| {
            RpcError::invalid_response(method, &format!("embedded payload is not JSON: {error}"))
        })?,
        LegacyPayload::Malformed => {
            return Err(RpcError::invalid_response(
                method,
                "status-code result without an encoded payload",
            ));
        }
    };

    Ok(match payload {
        Value::Object(mut object) if object.contains_key("items") => {
            object.remove("items").unwrap_or(Value::Null)
        }
        other => other,
    })
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Object(object) => match object.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => error.to_string(),
        },
        other => other.to_string(),
    }
}

//! Response classification.
//!
//! The transport hands back raw [`Value`]s; this module classifies a raw
//! single-request response as success or as an error condition. Batch
//! responses are not classified here; per-element validation is the
//! caller's concern.
//!
//! A response is valid when it is an object carrying the `"2.0"` version
//! marker, a numeric or string id, no `error` member, and a `result`
//! member. An `error` member wins over everything else and is surfaced as
//! [`Error::Rpc`] with the remote's code and message.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;

use crate::error::{Error, Result};
use crate::protocol::payload::JSONRPC_VERSION;

// ============================================================================
// Validation
// ============================================================================

/// Classifies a raw single-request response.
///
/// # Errors
///
/// - [`Error::Rpc`] when the response carries an `error` object.
/// - [`Error::InvalidResponse`] when the response is not an object, has a
///   wrong or missing version marker, a malformed id, or no `result`.
pub fn validate(response: &Value) -> Result<()> {
    let Some(object) = response.as_object() else {
        return Err(Error::invalid_response("response is not an object"));
    };

    if let Some(error) = object.get("error") {
        return Err(rpc_error(error));
    }

    if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return Err(Error::invalid_response("missing or wrong jsonrpc version"));
    }

    match object.get("id") {
        Some(id) if id.is_u64() || id.is_i64() || id.is_string() => {}
        _ => return Err(Error::invalid_response("missing or malformed id")),
    }

    if !object.contains_key("result") {
        return Err(Error::invalid_response("missing result field"));
    }

    Ok(())
}

/// Builds an [`Error::Rpc`] from a response's `error` member.
///
/// A bare string error (seen from lenient servers) becomes code 0 with the
/// string as message.
fn rpc_error(error: &Value) -> Error {
    match error {
        Value::String(message) => Error::rpc(0, message.clone()),
        value => {
            let code = value.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown RPC error")
                .to_string();
            Error::rpc(code, message)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

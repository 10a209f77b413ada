//! Codec for JSON-RPC message serialization and deserialization
//!
//! Thin, type-safe wrappers over `serde_json` that map failures onto the
//! crate's `Error` type:
//!
//! - Encoding failures → `Error::Serialization`
//! - Bodies that are not JSON → `Error::InvalidResponse` carrying a parse error
//! - JSON that is not a response object → `Error::InvalidResponse`
//!
//! # Examples
//!
//! ```rust
//! use mascot_core::{codec, JsonRpcRequest, Id};
//!
//! let request = JsonRpcRequest::new("Game.List", None, Id::Number(1));
//! let json = codec::encode_request(&request).unwrap();
//! assert!(json.contains("\"method\":\"Game.List\""));
//! ```

use crate::error::{Error, Result};
use crate::types::{JsonRpcRequest, JsonRpcResponse};
use serde::Serialize;

/// Encode any serializable message to a JSON string
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a JSON-RPC request to JSON
pub fn encode_request(req: &JsonRpcRequest) -> Result<String> {
    encode(req)
}

/// Decode a JSON-RPC response received from the server
///
/// Distinguishes a body that is not JSON at all from JSON that is not a
/// response object, so transport logs say which one happened.
pub fn decode_response(data: &str) -> Result<JsonRpcResponse> {
    let value: serde_json::Value = serde_json::from_str(data)
        .map_err(|e| Error::InvalidResponse(format!("Parse error: {}", e)))?;

    if value.is_array() {
        return Err(Error::InvalidResponse(
            "Unexpected batch response to a single request".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::InvalidResponse(format!("Not a JSON-RPC response: {}", e)))
}

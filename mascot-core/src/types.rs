//! JSON-RPC 2.0 message types
//!
//! The operator API only ever issues calls and reads their replies, so this
//! module carries the two message shapes that involves: `JsonRpcRequest` and
//! `JsonRpcResponse`, plus the `Id` used to correlate them.
//!
//! See https://www.jsonrpc.org/specification for the wire format.

use crate::error::JsonRpcErrorData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON-RPC 2.0 request ID
///
/// JSON-RPC 2.0 allows string, number, or null IDs. The client issues numeric
/// IDs from a counter but accepts any form on the way back.
///
/// # Examples
///
/// ```rust
/// use mascot_core::Id;
///
/// let id = Id::from(42u64);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier
    String(String),
    /// Numeric identifier
    Number(i64),
    /// Null identifier, used by servers that could not read the request id
    Null,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<u64> for Id {
    /// Values above `i64::MAX` wrap; the request counter never gets there.
    fn from(n: u64) -> Self {
        Id::Number(n as i64)
    }
}

/// JSON-RPC 2.0 request message
///
/// # Examples
///
/// ```rust
/// use mascot_core::{JsonRpcRequest, Id};
/// use serde_json::json;
///
/// let req = JsonRpcRequest::new("Session.Close", Some(json!({"SessionId": "s1"})), Id::Number(1));
/// assert_eq!(req.jsonrpc, "2.0");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version - always "2.0"
    pub jsonrpc: String,
    /// Name of the remote method to invoke
    pub method: String,
    /// Parameters, omitted from the wire when None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Identifier correlating this request with its response
    pub id: Id,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC 2.0 request
    pub fn new(method: impl Into<String>, params: Option<serde_json::Value>, id: Id) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 response message
///
/// Carries either a result (success) or an error (failure), never both.
///
/// # Examples
///
/// ```rust
/// use mascot_core::{codec, Id};
/// use serde_json::json;
///
/// let response = codec::decode_response(r#"{"jsonrpc":"2.0","result":{"Games":[]},"id":1}"#).unwrap();
/// assert_eq!(response.id, Id::Number(1));
/// assert_eq!(response.into_result().unwrap(), json!({"Games": []}));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version - always "2.0"
    pub jsonrpc: String,
    /// The result of the method invocation (present only on success)
    ///
    /// A present `null` result is kept as `Some(Value::Null)`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub result: Option<serde_json::Value>,
    /// Error information (present only on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorData>,
    /// Request ID from the original request
    pub id: Id,
}

impl JsonRpcResponse {
    /// Check if the response represents an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Split the response into its result or its error
    ///
    /// A response with neither field is reported as `InvalidResponse`.
    pub fn into_result(self) -> crate::Result<serde_json::Value> {
        if let Some(error) = self.error {
            return Err(crate::Error::JsonRpc(error));
        }
        self.result.ok_or_else(|| {
            crate::Error::InvalidResponse("Response missing both result and error".to_string())
        })
    }
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

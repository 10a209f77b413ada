//! Error types for the Mascot operator API
//!
//! This module defines the error taxonomy shared by every layer of the client:
//!
//! - **Error**: Application-level errors returned from every fallible operation (uses thiserror)
//! - **ValidationError**: Parameter contract violations detected before any network call
//! - **JsonRpcErrorData**: Wire-format errors as defined by JSON-RPC 2.0
//!
//! # Error Categories
//!
//! - **Configuration**: The client could not be constructed (missing `url`,
//!   unreadable client certificate)
//! - **Validation**: The caller passed parameters that break a method contract.
//!   These are programmer-facing and never reach the network.
//! - **Transport**: Anything that happened on the wire: HTTP/TLS failures,
//!   malformed responses, or an error object returned by the server
//!
//! # Examples
//!
//! ```rust
//! use mascot_core::{Error, ValidationError};
//!
//! let error: Error = ValidationError::Missing { field: "SessionId".into() }.into();
//! assert!(error.is_validation());
//! assert!(error.to_string().contains("SessionId"));
//! ```

use crate::validation::ParamType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for Mascot client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Application-level error type for Mascot client operations
///
/// Validation and configuration errors are produced locally. Every other
/// variant originates in the transport and is passed to the caller
/// unmodified: this layer never retries and never falls back.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Missing or invalid client configuration
    ///
    /// Raised at construction time only, before any transport exists.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request parameters failed their method contract
    ///
    /// Raised before any network call is attempted.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON-RPC error object returned by the server
    #[error("JSON-RPC error: {0}")]
    JsonRpc(#[from] JsonRpcErrorData),

    /// HTTP or TLS level failure
    ///
    /// Covers connection refusals, handshake failures and non-success
    /// status codes that carry no JSON-RPC body.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server rejected the client certificate or credentials (401/403)
    #[error("Access denied (HTTP {0})")]
    AccessDenied(u16),

    /// The HTTP layer gave up waiting for a response
    #[error("Request timeout")]
    Timeout,

    /// Serialization or deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The server answered with something that is not a usable JSON-RPC response
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// True when the error was raised by parameter validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// True when the error originated in the transport (network, TLS,
    /// protocol or a server-side JSON-RPC error)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::JsonRpc(_)
                | Error::Http(_)
                | Error::AccessDenied(_)
                | Error::Timeout
                | Error::Serialization(_)
                | Error::InvalidResponse(_)
        )
    }

    /// The validation failure carried by this error, if any
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(e) => Some(e),
            _ => None,
        }
    }

    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "configuration",
            Error::Validation(_) => "validation",
            Error::JsonRpc(_) => "json_rpc",
            Error::Http(_) => "http",
            Error::AccessDenied(_) => "access_denied",
            Error::Timeout => "timeout",
            Error::Serialization(_) => "serialization",
            Error::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// A request parameter that broke its method contract
///
/// Every variant except `NotAnObject` names the offending field, so callers
/// can report exactly which input was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent
    #[error("missing required parameter '{field}'")]
    Missing {
        /// Wire name of the field
        field: String,
    },

    /// A field is present but holds the wrong JSON type
    #[error("parameter '{field}' must be {expected}, got {actual}")]
    TypeMismatch {
        /// Wire name of the field
        field: String,
        /// The type the method contract requires
        expected: ParamType,
        /// JSON type name of the value that was supplied
        actual: &'static str,
    },

    /// A field holds a value outside its allowed set
    #[error("parameter '{field}' must be one of [{}], got {actual}", allowed.join(", "))]
    NotAllowed {
        /// Wire name of the field
        field: String,
        /// Accepted values
        allowed: Vec<String>,
        /// The rejected value, rendered as JSON
        actual: String,
    },

    /// The parameters did not serialize to a JSON object
    #[error("parameters must be a JSON object, got {actual}")]
    NotAnObject {
        /// JSON type name of the value that was supplied
        actual: &'static str,
    },
}

impl ValidationError {
    /// Wire name of the offending field, when the error concerns one field
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Missing { field }
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::NotAllowed { field, .. } => Some(field),
            ValidationError::NotAnObject { .. } => None,
        }
    }
}

/// JSON-RPC 2.0 error object
///
/// This structure represents the exact wire format for JSON-RPC errors.
/// It appears in the `error` field of a `JsonRpcResponse` and is surfaced to
/// callers as `Error::JsonRpc` without modification.
///
/// # Standard Error Codes
///
/// - `-32700`: Parse error
/// - `-32600`: Invalid Request
/// - `-32601`: Method not found
/// - `-32602`: Invalid params
/// - `-32603`: Internal error
/// - `-32000 to -32099`: Server error (implementation-defined)
///
/// # Examples
///
/// ```rust
/// use mascot_core::JsonRpcErrorData;
///
/// let error: JsonRpcErrorData =
///     serde_json::from_str(r#"{"code":-32601,"message":"Method not found"}"#).unwrap();
/// assert_eq!(error.code, -32601);
/// assert_eq!(error.to_string(), "[-32601] Method not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code indicating the error type
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Optional additional error information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcErrorData {
    /// Create a new JSON-RPC error with code and message
    ///
    /// Useful for `Transport` implementations that report server-side
    /// failures without a wire response.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    /// Formats as "[code] message", e.g. "[-32601] Method not found"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcErrorData {}

//! Core types for the Mascot operator API client
//!
//! This crate holds everything that does not touch the network:
//!
//! - **Types**: JSON-RPC 2.0 request and response structures
//! - **Codec**: Encoding requests and decoding server responses
//! - **Error handling**: The error taxonomy shared by every layer
//! - **Validation**: Per-method parameter contracts checked before dispatch
//! - **Observability**: OpenTelemetry and `tracing` bootstrap
//!
//! The `mascot-client` crate builds the HTTP transport and the operator API
//! surface on top of these pieces.
//!
//! # Example
//!
//! ```rust
//! use mascot_core::validation::{self, ParamType};
//! use serde_json::json;
//!
//! let params = validation::to_params(json!({"SessionId": "s1"})).unwrap();
//! assert!(validation::required_param(&params, "SessionId", ParamType::String).is_ok());
//! assert!(validation::required_param(&params, "GameId", ParamType::String).is_err());
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod types;
pub mod validation;

pub use error::{Error, JsonRpcErrorData, Result, ValidationError};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{Id, JsonRpcRequest, JsonRpcResponse};
pub use validation::{FieldRule, ParamType, Params};

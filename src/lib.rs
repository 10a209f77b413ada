//! Mascot - Operator API client
//!
//! This is the convenience crate that re-exports the Mascot sub-crates.
//!
//! # Architecture
//!
//! - **mascot-core**: JSON-RPC types, codec, error handling, validation, observability
//! - **mascot-client**: Operator API client and HTTPS transport
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mascot::OperatorClient;
//! use mascot::client::CloseSession;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OperatorClient::builder()
//!         .url("https://api.mascot.games/v1/")
//!         .ssl_key_path("/etc/mascot/apikey.pem")
//!         .build()?;
//!
//!     client.close_session(CloseSession::new("s1")).await?;
//!     Ok(())
//! }
//! ```

pub use mascot_client as client;
pub use mascot_core as core;

pub use mascot_client::{ClientBuilder, ClientConfig, OperatorClient};
pub use mascot_core::{Error, Result};

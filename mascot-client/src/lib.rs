//! Client for the Mascot gaming operator API
//!
//! This crate provides a validating JSON-RPC 2.0 client for the operator
//! API: bank groups, players, bonuses, game sessions and history tokens.
//! Every call checks its parameters against the method's contract before
//! anything is sent, so malformed requests never leave the process.
//!
//! # Core Features
//!
//! - **Typed operations**: One async method per API call
//! - **Parameter validation**: Required fields, nominal types and allowed values
//! - **HTTPS transport**: `reqwest` with rustls and optional mutual TLS
//! - **Pluggable transport**: Any `Transport` implementation can stand in for HTTP
//! - **Observability**: OpenTelemetry integration for traces and metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mascot_client::{ClientBuilder, requests::{Player, SessionRequest}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClientBuilder::new("https://api.mascot.games/v1/")
//!         .ssl_key_path("/etc/mascot/apikey.pem")
//!         .build()?;
//!
//!     client.set_player(Player::new("player-1", "eur-group").with_nick("Lucky")).await?;
//!
//!     let session = client.create_session(SessionRequest::new("player-1", "starburst")).await?;
//!     println!("Session: {}", session);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Untyped Parameters
//!
//! ```rust,no_run
//! use mascot_client::OperatorClient;
//! use serde_json::json;
//!
//! # async fn example() -> mascot_core::Result<()> {
//! let client = OperatorClient::from_env()?;
//! let token = client
//!     .get_history_token(json!({"SessionId": "s1", "ExpiryInSeconds": 3600}))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod client_builder;
mod config;
mod metrics;
pub mod requests;
mod transport;

pub use client::OperatorClient;
pub use client_builder::ClientBuilder;
pub use config::{
    ClientConfig, ENV_DEBUG, ENV_SSL_KEY_PATH, ENV_SSL_VERIFICATION, ENV_TIMEOUT_SECS, ENV_URL,
};
pub use metrics::ClientMetrics;
pub use requests::{
    BankGroup, Bonus, CloseSession, DemoSessionRequest, HistoryTokenRequest, ListGames, Player,
    RestorePolicy, SessionRequest,
};
pub use transport::{HttpTransport, Transport};

//! Operator API client
//!
//! `OperatorClient` exposes one async method per operator API call. Every
//! call goes through the same pipeline:
//!
//! 1. **Convert**: Serialize the caller's parameters into a JSON object
//! 2. **Validate**: Check them against the method's `FieldRule` table
//! 3. **Dispatch**: Hand method name and parameters to the `Transport`
//! 4. **Return**: Pass the decoded `result` back unchanged
//!
//! A validation failure stops the call before anything reaches the
//! transport. Transport failures come back exactly as the transport
//! reported them; nothing is retried.
//!
//! # Parameters
//!
//! Each operation accepts anything that serializes to a JSON object. The
//! typed structs in `crate::requests` are the usual choice; plain
//! `serde_json::json!` objects are validated against the same contract.
//!
//! # Cloning
//!
//! `OperatorClient` is cheaply cloneable. Clones share the transport (and
//! its connection pool) and the metrics handle.

use crate::metrics::ClientMetrics;
use crate::requests::{self, MethodSpec};
use crate::transport::Transport;
use crate::{ClientBuilder, ClientConfig};
use mascot_core::validation::{self, Params};
use mascot_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Validating client for the Mascot operator API
#[derive(Clone)]
pub struct OperatorClient {
    transport: Arc<dyn Transport>,
    metrics: Option<Arc<ClientMetrics>>,
}

impl OperatorClient {
    /// Start configuring a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Build an HTTPS client from a configuration
    ///
    /// Fails with `Error::Configuration` when `url` is missing or the client
    /// certificate cannot be loaded.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        ClientBuilder::from_config(config).build()
    }

    /// Build an HTTPS client from `MASCOT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Client over an arbitrary transport, without metrics
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::from_parts(Arc::new(transport), None)
    }

    pub(crate) fn from_parts(
        transport: Arc<dyn Transport>,
        metrics: Option<Arc<ClientMetrics>>,
    ) -> Self {
        Self { transport, metrics }
    }

    /// List the games available to the operator (`Game.List`)
    ///
    /// `BankGroupId` is validated when present but the server is always
    /// asked for the full list: the call is sent with empty parameters.
    pub async fn list_games<P: Serialize>(&self, params: P) -> Result<Value> {
        self.dispatch(&requests::LIST_GAMES, params).await
    }

    /// Create or update a bank group (`BankGroup.Set`)
    pub async fn set_bank_group<P: Serialize>(&self, bank_group: P) -> Result<Value> {
        self.dispatch(&requests::SET_BANK_GROUP, bank_group).await
    }

    /// Create or update a player (`Player.Set`)
    pub async fn set_player<P: Serialize>(&self, player: P) -> Result<Value> {
        self.dispatch(&requests::SET_PLAYER, player).await
    }

    /// Create or update a bonus (`Bonus.Set`)
    pub async fn set_bonus<P: Serialize>(&self, bonus: P) -> Result<Value> {
        self.dispatch(&requests::SET_BONUS, bonus).await
    }

    /// Open a game session for a player (`Session.Create`)
    ///
    /// `RestorePolicy`, when given, must be `"Restore"` or `"Create"`.
    pub async fn create_session<P: Serialize>(&self, session: P) -> Result<Value> {
        self.dispatch(&requests::CREATE_SESSION, session).await
    }

    /// Open a demo session not tied to a player balance (`Session.CreateDemo`)
    pub async fn create_demo_session<P: Serialize>(&self, demo: P) -> Result<Value> {
        self.dispatch(&requests::CREATE_DEMO_SESSION, demo).await
    }

    /// Close a session (`Session.Close`)
    pub async fn close_session<P: Serialize>(&self, session: P) -> Result<Value> {
        self.dispatch(&requests::CLOSE_SESSION, session).await
    }

    /// Issue a token granting access to a session's history (`History.GetToken`)
    pub async fn get_history_token<P: Serialize>(&self, params: P) -> Result<Value> {
        self.dispatch(&requests::GET_HISTORY_TOKEN, params).await
    }

    /// Call any RPC method without a parameter contract
    ///
    /// Only checks that `params` is a JSON object. Use it for methods this
    /// client does not wrap.
    pub async fn call<P: Serialize>(&self, method: &str, params: P) -> Result<Value> {
        let params = validation::to_params(params).map_err(|e| self.rejected(method, e))?;
        self.send(method, params).await
    }

    /// Deserialize an operation result into a typed structure
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mascot_client::OperatorClient;
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// #[serde(rename_all = "PascalCase")]
    /// struct Session {
    ///     session_id: String,
    ///     session_url: String,
    /// }
    ///
    /// let session: Session = OperatorClient::decode(json!({
    ///     "SessionId": "s1",
    ///     "SessionUrl": "https://play.mascot.games/s1",
    /// })).unwrap();
    /// assert_eq!(session.session_id, "s1");
    /// ```
    pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|e| Error::Serialization(e.to_string()))
    }

    async fn dispatch<P: Serialize>(&self, spec: &MethodSpec, params: P) -> Result<Value> {
        let params = validation::to_params(params).map_err(|e| self.rejected(spec.name, e))?;
        validation::validate(&params, spec.rules).map_err(|e| self.rejected(spec.name, e.into()))?;

        let params = if spec.forward_params {
            params
        } else {
            Params::new()
        };

        self.send(spec.name, params).await
    }

    /// Log and count a call that never reached the transport
    fn rejected(&self, method: &str, error: Error) -> Error {
        if let Some(validation) = error.as_validation() {
            tracing::debug!(method = %method, error = %validation, "Parameters rejected");
            if let Some(ref m) = self.metrics {
                m.record_validation_failure(method, validation.field());
            }
        }
        error
    }

    #[tracing::instrument(skip(self, params), fields(method = %method))]
    async fn send(&self, method: &str, params: Params) -> Result<Value> {
        let start = Instant::now();
        let outcome = self.transport.execute(method, params).await;
        let duration = start.elapsed().as_secs_f64();

        match &outcome {
            Ok(_) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(method, "success", duration);
                }
                tracing::debug!(method = %method, duration_secs = duration, "Request completed successfully");
            }
            Err(e) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(method, "error", duration);
                    m.record_error(e.kind());
                }
                match e {
                    Error::JsonRpc(data) => {
                        tracing::warn!(method = %method, code = data.code, error = %data.message, "Server returned an error")
                    }
                    other => tracing::error!(method = %method, error = %other, "Request failed"),
                }
            }
        }

        outcome
    }
}

impl std::fmt::Debug for OperatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorClient")
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

//! Client builder for configuring TLS, debugging and observability
//!
//! The `ClientBuilder` provides a fluent API over `ClientConfig`. It allows you to:
//! - Point the client at an API URL
//! - Present a client certificate for mutual TLS
//! - Log request and response bodies
//! - Configure observability (OpenTelemetry)
//!
//! # Examples
//!
//! ```rust,no_run
//! use mascot_client::ClientBuilder;
//!
//! # fn example() -> mascot_core::Result<()> {
//! let client = ClientBuilder::new("https://api.mascot.games/v1/")
//!     .ssl_key_path("/etc/mascot/apikey.pem")
//!     .timeout(30)
//!     .build()?;
//!
//! // With observability
//! let client2 = ClientBuilder::new("https://api.mascot.games/v1/")
//!     .ssl_key_path("/etc/mascot/apikey.pem")
//!     .with_default_observability()
//!     .service_name("casino-backend")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::transport::HttpTransport;
use crate::{ClientConfig, ClientMetrics, OperatorClient};
use mascot_core::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for configuring and creating an `OperatorClient`
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    observability_config: Option<mascot_core::ObservabilityConfig>,
    service_name: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(url))
    }

    /// Start from an existing configuration
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            observability_config: None,
            service_name: None,
        }
    }

    /// Set the API URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = Some(url.into());
        self
    }

    /// Present the certificate and key in this PEM file
    pub fn ssl_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ssl_key_path = Some(path.into());
        self
    }

    /// Log full request and response bodies
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    /// Verify the server certificate (default). Turning this off is insecure.
    pub fn ssl_verification(mut self, enabled: bool) -> Self {
        self.config.ssl_verification = enabled;
        self
    }

    /// Overall HTTP timeout per call, in seconds
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.timeout_secs = Some(secs);
        self
    }

    /// Enable OpenTelemetry observability with custom configuration
    pub fn with_observability(mut self, config: mascot_core::ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable OpenTelemetry observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(mascot_core::ObservabilityConfig::default());
        self
    }

    /// Set service name for observability (used if observability is enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// The configuration the client will be built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the client
    ///
    /// The URL is checked first, so a missing URL fails before any
    /// telemetry is installed or any HTTP client is created.
    pub fn build(self) -> Result<OperatorClient> {
        let url = self.config.require_url()?;

        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            mascot_core::init_observability(config.clone()).map_err(|e| {
                Error::Configuration(format!("Failed to initialize observability: {}", e))
            })?;

            Some(Arc::new(ClientMetrics::new(config.service_name)))
        } else {
            None
        };

        let transport = HttpTransport::new(url, &self.config)?;
        tracing::info!(url = %transport.url(), debug = self.config.debug, "Operator client ready");

        Ok(OperatorClient::from_parts(Arc::new(transport), metrics))
    }
}

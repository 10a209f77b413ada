//! Client configuration
//!
//! `ClientConfig` is the construction-time configuration of an
//! `OperatorClient`. It can be built in code, deserialized from any serde
//! format, or read from the environment:
//!
//! | Field | Keys accepted | Environment variable | Default |
//! |---|---|---|---|
//! | url | `url` | `MASCOT_API_URL` | none (required) |
//! | ssl_key_path | `sslKeyPath`, `ssl_key_path` | `MASCOT_SSL_KEY_PATH` | none |
//! | debug | `debug` | `MASCOT_DEBUG` | false |
//! | ssl_verification | `sslVerification`, `ssl_verification` | `MASCOT_SSL_VERIFICATION` | true |
//! | timeout_secs | `timeoutSecs`, `timeout_secs` | `MASCOT_TIMEOUT_SECS` | none |
//!
//! # Examples
//!
//! ```rust
//! use mascot_client::ClientConfig;
//! use serde_json::json;
//!
//! let config = ClientConfig::from_value(json!({
//!     "url": "https://api.mascot.games/v1/",
//!     "sslKeyPath": "/etc/mascot/apikey.pem",
//! })).unwrap();
//!
//! assert!(config.ssl_verification);
//! assert!(!config.debug);
//! ```

use mascot_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the API URL
pub const ENV_URL: &str = "MASCOT_API_URL";
/// Environment variable holding the client certificate path
pub const ENV_SSL_KEY_PATH: &str = "MASCOT_SSL_KEY_PATH";
/// Environment variable enabling request/response logging
pub const ENV_DEBUG: &str = "MASCOT_DEBUG";
/// Environment variable controlling certificate verification
pub const ENV_SSL_VERIFICATION: &str = "MASCOT_SSL_VERIFICATION";
/// Environment variable holding the HTTP timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "MASCOT_TIMEOUT_SECS";

/// Construction-time configuration of an `OperatorClient`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// JSON-RPC 2.0 endpoint of the operator API
    pub url: Option<String>,

    /// PEM file holding the client certificate and its private key
    #[serde(alias = "sslKeyPath")]
    pub ssl_key_path: Option<PathBuf>,

    /// Log every request and response body
    pub debug: bool,

    /// Verify the server certificate; disabling this is insecure
    #[serde(alias = "sslVerification")]
    pub ssl_verification: bool,

    /// Overall HTTP timeout per call, in seconds
    #[serde(alias = "timeoutSecs")]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: None,
            ssl_key_path: None,
            debug: false,
            ssl_verification: true,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `url`, everything else at defaults
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Deserialize a configuration mapping
    ///
    /// Unknown keys are ignored. A mapping without `url` deserializes fine;
    /// the missing URL is reported when the client is built.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::Configuration(format!("Invalid client configuration: {}", e)))
    }

    /// Read the configuration from `MASCOT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            url: lookup(ENV_URL),
            ssl_key_path: lookup(ENV_SSL_KEY_PATH).map(PathBuf::from),
            ..Default::default()
        };

        if let Some(raw) = lookup(ENV_DEBUG) {
            config.debug = parse_flag(ENV_DEBUG, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SSL_VERIFICATION) {
            config.ssl_verification = parse_flag(ENV_SSL_VERIFICATION, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                Error::Configuration(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
            config.timeout_secs = Some(secs);
        }

        Ok(config)
    }

    /// The configured URL, or a configuration error when it is absent or blank
    pub fn require_url(&self) -> Result<&str> {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(Error::Configuration("You must specify url for API".to_string())),
        }
    }

    /// The HTTP timeout, when one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Configuration(format!("{} must be a boolean, got '{}'", name, raw))),
    }
}

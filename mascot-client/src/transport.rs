//! JSON-RPC transport
//!
//! `Transport` is the seam between the validated operator API and the wire.
//! It takes a method name and an already-validated parameter mapping, performs
//! one round trip, and returns the decoded `result` (or the error the server
//! or the network produced).
//!
//! `HttpTransport` is the production implementation: JSON-RPC 2.0 over HTTPS
//! via `reqwest` with rustls, optionally presenting a client certificate for
//! mutual TLS. Tests substitute their own implementation to observe what
//! would have been sent.
//!
//! # Request Lifecycle
//!
//! 1. **Frame**: Wrap method and params in a JSON-RPC envelope with the next numeric id
//! 2. **Send**: POST the envelope as `application/json`
//! 3. **Decode**: Parse the body as a JSON-RPC response; a non-2xx status
//!    is only accepted with an error object
//! 4. **Unwrap**: Return `result`, or surface `error` as `Error::JsonRpc`
//!
//! Nothing is retried. Failures reach the caller as soon as they happen.

use crate::config::ClientConfig;
use async_trait::async_trait;
use mascot_core::{codec, Error, Id, JsonRpcRequest, Params, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// A JSON-RPC caller bound to one endpoint
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one call and return the decoded `result`
    async fn execute(&self, method: &str, params: Params) -> Result<Value>;
}

/// JSON-RPC 2.0 over HTTPS
pub struct HttpTransport {
    http: reqwest::Client,
    url: reqwest::Url,
    debug: bool,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Build a transport bound to `url` with the TLS settings from `config`
    ///
    /// Reads the client certificate from `config.ssl_key_path` when set. The
    /// file must be PEM and contain both the certificate and its private key.
    pub fn new(url: &str, config: &ClientConfig) -> Result<Self> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| Error::Configuration(format!("Invalid API url '{}': {}", url, e)))?;

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(concat!("mascot-client/", env!("CARGO_PKG_VERSION")));

        if !config.ssl_verification {
            tracing::warn!(url = %url, "Server certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        match &config.ssl_key_path {
            Some(path) => {
                let pem = std::fs::read(path).map_err(|e| {
                    Error::Configuration(format!(
                        "Failed to read client certificate {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let identity = reqwest::Identity::from_pem(&pem).map_err(|e| {
                    Error::Configuration(format!(
                        "Invalid client certificate {}: {}",
                        path.display(),
                        error_chain(&e)
                    ))
                })?;
                tracing::debug!(path = %path.display(), "Client certificate loaded");
                builder = builder.identity(identity);
            }
            None => tracing::warn!("No client certificate configured, mutual TLS is off"),
        }

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(|e| {
            Error::Configuration(format!("Failed to build HTTP client: {}", error_chain(&e)))
        })?;

        Ok(Self {
            http,
            url,
            debug: config.debug,
            next_id: AtomicU64::new(1),
        })
    }

    /// The endpoint this transport posts to
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    fn next_id(&self) -> Id {
        Id::from(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, params), fields(method = %method, id = tracing::field::Empty))]
    async fn execute(&self, method: &str, params: Params) -> Result<Value> {
        let id = self.next_id();
        tracing::Span::current().record("id", tracing::field::display(&id));

        let request = JsonRpcRequest::new(method, Some(Value::Object(params)), id.clone());
        let body = codec::encode_request(&request)?;

        if self.debug {
            tracing::info!(target: "mascot_client::transport", url = %self.url, body = %body, "==> Request");
        }

        let response = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        if self.debug {
            tracing::info!(target: "mascot_client::transport", status = status.as_u16(), body = %text, "<== Response");
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::AccessDenied(status.as_u16()));
        }

        // A failing status only carries meaning when the body is an error object
        let decoded = match codec::decode_response(&text) {
            Ok(decoded) if status.is_success() || decoded.is_error() => decoded,
            Ok(_) => {
                tracing::debug!(status = status.as_u16(), "Non-success status with a success body");
                return Err(Error::Http(format!("HTTP {} from {}", status, self.url)));
            }
            Err(e) if !status.is_success() => {
                tracing::debug!(error = %e, "Non-success status without a JSON-RPC body");
                return Err(Error::Http(format!("HTTP {} from {}", status, self.url)));
            }
            Err(e) => return Err(e),
        };

        // Error objects are surfaced even when the server could not echo the id
        if !decoded.is_error() && decoded.id != id {
            return Err(Error::InvalidResponse(format!(
                "Response id {} does not match request id {}",
                decoded.id, id
            )));
        }

        decoded.into_result()
    }
}

fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Http(error_chain(&e))
    }
}

/// Render an error with its source chain, e.g. "error sending request: tls handshake eof"
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = ClientConfig::default();
        let err = HttpTransport::new("not a url", &config).err().unwrap();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_new_without_certificate() {
        let config = ClientConfig::new("https://api.mascot.games/v1/");
        let transport = HttpTransport::new("https://api.mascot.games/v1/", &config).unwrap();
        assert_eq!(transport.url(), "https://api.mascot.games/v1/");
    }

    #[test]
    fn test_new_with_missing_certificate_file() {
        let mut config = ClientConfig::new("https://api.mascot.games/v1/");
        config.ssl_key_path = Some("/nonexistent/mascot/apikey.pem".into());

        let err = HttpTransport::new("https://api.mascot.games/v1/", &config).err().unwrap();
        match err {
            Error::Configuration(msg) => assert!(msg.contains("/nonexistent/mascot/apikey.pem")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_without_verification() {
        let mut config = ClientConfig::new("https://api.mascot.games/v1/");
        config.ssl_verification = false;
        config.timeout_secs = Some(5);

        assert!(HttpTransport::new("https://api.mascot.games/v1/", &config).is_ok());
    }

    #[test]
    fn test_ids_increment() {
        let config = ClientConfig::default();
        let transport = HttpTransport::new("http://localhost:1/", &config).unwrap();

        assert_eq!(transport.next_id(), Id::Number(1));
        assert_eq!(transport.next_id(), Id::Number(2));
    }

    #[test]
    fn test_error_chain_includes_sources() {
        #[derive(Debug)]
        struct Outer(io::Error);

        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "error sending request")
            }
        }

        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let err = Outer(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"));
        assert_eq!(error_chain(&err), "error sending request: connection refused");
    }
}

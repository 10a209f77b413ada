//! Common test utilities for mascot-client integration tests
//!
//! This module provides a recording transport double and a mock JSON-RPC
//! HTTP server, so client behavior can be tested without the real API.

#![allow(dead_code)]

use async_trait::async_trait;
use mascot_client::Transport;
use mascot_core::{Error, JsonRpcErrorData, Params, Result};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use warp::http::StatusCode;
use warp::Filter;

type Responder = dyn Fn(&str, &Params) -> Result<Value> + Send + Sync;

/// Transport double that records every call it receives
///
/// Clones share the recorded calls, so a test can keep one handle while the
/// client owns another.
#[derive(Clone)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<(String, Params)>>>,
    responder: Arc<Responder>,
}

impl RecordingTransport {
    /// Answer every call with `{"Ok": true}`
    pub fn new() -> Self {
        Self::with_responder(|_, _| Ok(json!({"Ok": true})))
    }

    /// Answer every call with `value`
    pub fn returning(value: Value) -> Self {
        Self::with_responder(move |_, _| Ok(value.clone()))
    }

    /// Fail every call with `error`
    pub fn failing(error: Error) -> Self {
        Self::with_responder(move |_, _| Err(error.clone()))
    }

    /// Answer calls with a custom function
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&str, &Params) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(responder),
        }
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().unwrap().clone()
    }

    /// The single call received, panicking if there was not exactly one
    pub fn only_call(&self) -> (String, Value) {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one transport call, got {:?}", calls);
        let (method, params) = calls.into_iter().next().unwrap();
        (method, Value::Object(params))
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, method: &str, params: Params) -> Result<Value> {
        let response = (*self.responder)(method, &params);
        self.calls.lock().unwrap().push((method.to_string(), params));
        response
    }
}

/// A canned HTTP reply: status code and raw body
pub type Reply = (u16, String);

/// Mock JSON-RPC server over plain HTTP
///
/// Accepts POST requests on any path, hands the parsed body to a handler
/// and sends back whatever the handler returns.
pub struct MockRpcServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    request_rx: mpsc::UnboundedReceiver<Value>,
}

impl MockRpcServer {
    /// Start a server that answers every request with `{"Ok": true}`
    pub async fn new() -> Self {
        Self::with_handler(|request| rpc_result(&request, json!({"Ok": true}))).await
    }

    /// Start a server with a custom request handler
    pub async fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(Value) -> Reply + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let (request_tx, request_rx) = mpsc::unbounded_channel::<Value>();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let route = warp::post()
            .and(warp::body::bytes())
            .map(move |body: warp::hyper::body::Bytes| {
                let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                let _ = request_tx.send(request.clone());

                let (status, body) = (*handler)(request);
                warp::reply::with_status(
                    warp::reply::with_header(body, "content-type", "application/json"),
                    StatusCode::from_u16(status).unwrap(),
                )
            });

        let (addr, server) =
            warp::serve(route).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async move {
                shutdown_rx.await.ok();
            });
        tokio::spawn(server);

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            request_rx,
        }
    }

    /// Get the URL for connecting to this server
    pub fn url(&self) -> String {
        format!("http://{}/v1/", self.addr)
    }

    /// Wait for the next request body received by the server
    ///
    /// Returns None if nothing arrives within five seconds.
    pub async fn next_request(&mut self) -> Option<Value> {
        tokio::time::timeout(std::time::Duration::from_secs(5), self.request_rx.recv())
            .await
            .ok()
            .flatten()
    }

    /// Shutdown the mock server
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockRpcServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A 200 reply carrying `result` for `request`
pub fn rpc_result(request: &Value, result: Value) -> Reply {
    let body = json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": request["id"],
    });
    (200, body.to_string())
}

/// A 200 reply carrying a JSON-RPC error object for `request`
pub fn rpc_error(request: &Value, error: JsonRpcErrorData) -> Reply {
    let body = json!({
        "jsonrpc": "2.0",
        "error": error,
        "id": request["id"],
    });
    (200, body.to_string())
}

/// Valid parameters for every wrapped method
pub fn valid_params(method: &str) -> Value {
    match method {
        "Game.List" => json!({"BankGroupId": "eur-group"}),
        "BankGroup.Set" => json!({"Id": "eur-group", "Currency": "EUR", "SettingsPatch": 7}),
        "Player.Set" => json!({"Id": "player-1", "BankGroupId": "eur-group", "Nick": "Lucky"}),
        "Bonus.Set" => json!({"Id": "bonus-1"}),
        "Session.Create" => json!({
            "PlayerId": "player-1",
            "GameId": "starburst",
            "BonusId": "bonus-1",
            "RestorePolicy": "Restore",
            "StaticHost": "static.example.com",
            "AlternativeId": "alt-1",
        }),
        "Session.CreateDemo" => json!({
            "GameId": "starburst",
            "BankGroupId": "eur-group",
            "StartBalance": 10000,
            "StaticHost": "static.example.com",
        }),
        "Session.Close" => json!({"SessionId": "session-1"}),
        "History.GetToken" => json!({"SessionId": "session-1", "ExpiryInSeconds": 3600}),
        other => panic!("no fixture for {}", other),
    }
}

/// Invoke the client operation wrapping `method`
pub async fn invoke(client: &mascot_client::OperatorClient, method: &str, params: Value) -> Result<Value> {
    match method {
        "Game.List" => client.list_games(params).await,
        "BankGroup.Set" => client.set_bank_group(params).await,
        "Player.Set" => client.set_player(params).await,
        "Bonus.Set" => client.set_bonus(params).await,
        "Session.Create" => client.create_session(params).await,
        "Session.CreateDemo" => client.create_demo_session(params).await,
        "Session.Close" => client.close_session(params).await,
        "History.GetToken" => client.get_history_token(params).await,
        other => panic!("no operation wraps {}", other),
    }
}

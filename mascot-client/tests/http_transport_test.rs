//! HTTP transport tests against a mock JSON-RPC server

mod common;

use common::{rpc_error, rpc_result, MockRpcServer};
use mascot_client::{ClientBuilder, ClientConfig, CloseSession, HttpTransport, OperatorClient, Transport};
use mascot_core::{Error, JsonRpcErrorData};
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// In-memory log sink for a thread-local subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn client_for(server: &MockRpcServer) -> OperatorClient {
    ClientBuilder::new(server.url()).timeout(5).build().unwrap()
}

#[tokio::test]
async fn test_request_envelope() {
    let mut server = MockRpcServer::new().await;
    let client = client_for(&server);

    client.close_session(CloseSession::new("s1")).await.unwrap();

    let request = server.next_request().await.expect("request");
    assert_eq!(request["jsonrpc"], "2.0");
    assert_eq!(request["method"], "Session.Close");
    assert_eq!(request["params"], json!({"SessionId": "s1"}));
    assert!(request["id"].is_u64());
}

#[tokio::test]
async fn test_result_is_returned() {
    let server = MockRpcServer::with_handler(|request| {
        rpc_result(&request, json!({"SessionId": "s1", "SessionUrl": "https://play.example.com/s1"}))
    })
    .await;
    let client = client_for(&server);

    let result = client
        .create_session(json!({"PlayerId": "p1", "GameId": "g1"}))
        .await
        .unwrap();

    assert_eq!(result["SessionUrl"], "https://play.example.com/s1");
}

#[tokio::test]
async fn test_ids_increase_per_call() {
    let mut server = MockRpcServer::new().await;
    let client = client_for(&server);

    client.set_bonus(json!({"Id": "b1"})).await.unwrap();
    client.set_bonus(json!({"Id": "b2"})).await.unwrap();

    let first = server.next_request().await.unwrap()["id"].as_u64().unwrap();
    let second = server.next_request().await.unwrap()["id"].as_u64().unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn test_list_games_sends_empty_params_on_the_wire() {
    let mut server = MockRpcServer::with_handler(|request| rpc_result(&request, json!([]))).await;
    let client = client_for(&server);

    let games = client.list_games(json!({"BankGroupId": "abc"})).await.unwrap();
    assert_eq!(games, json!([]));

    let request = server.next_request().await.unwrap();
    assert_eq!(request["method"], "Game.List");
    assert_eq!(request["params"], json!({}));
}

#[tokio::test]
async fn test_error_object_is_surfaced() {
    let server = MockRpcServer::with_handler(|request| {
        rpc_error(&request, JsonRpcErrorData::new(-32001, "Session not found"))
    })
    .await;
    let client = client_for(&server);

    let err = client.close_session(CloseSession::new("missing")).await.unwrap_err();

    match err {
        Error::JsonRpc(data) => {
            assert_eq!(data.code, -32001);
            assert_eq!(data.message, "Session not found");
        }
        other => panic!("expected JsonRpc error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_is_access_denied() {
    let server = MockRpcServer::with_handler(|_| (401, String::new())).await;
    let client = client_for(&server);

    let err = client.set_bonus(json!({"Id": "b1"})).await.unwrap_err();
    assert!(matches!(err, Error::AccessDenied(401)));
}

#[tokio::test]
async fn test_forbidden_is_access_denied() {
    let server = MockRpcServer::with_handler(|_| (403, "Forbidden".to_string())).await;
    let client = client_for(&server);

    let err = client.set_bonus(json!({"Id": "b1"})).await.unwrap_err();
    assert!(matches!(err, Error::AccessDenied(403)));
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let server = MockRpcServer::with_handler(|_| (500, "<html>oops</html>".to_string())).await;
    let client = client_for(&server);

    let err = client.set_bonus(json!({"Id": "b1"})).await.unwrap_err();
    match err {
        Error::Http(msg) => assert!(msg.contains("500"), "message was {}", msg),
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_with_error_object() {
    let server = MockRpcServer::with_handler(|request| {
        let (_, body) = rpc_error(&request, JsonRpcErrorData::new(-32603, "database down"));
        (500, body)
    })
    .await;
    let client = client_for(&server);

    let err = client.set_bonus(json!({"Id": "b1"})).await.unwrap_err();
    assert!(matches!(err, Error::JsonRpc(ref data) if data.code == -32603));
}

#[tokio::test]
async fn test_server_error_with_success_body_is_http_error() {
    let server = MockRpcServer::with_handler(|request| {
        let (_, body) = rpc_result(&request, json!({"Ok": true}));
        (502, body)
    })
    .await;
    let client = client_for(&server);

    let err = client.set_bonus(json!({"Id": "b1"})).await.unwrap_err();
    match err {
        Error::Http(msg) => assert!(msg.contains("502"), "message was {}", msg),
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_garbage_body_is_invalid_response() {
    let server = MockRpcServer::with_handler(|_| (200, "not json".to_string())).await;
    let client = client_for(&server);

    let err = client.set_bonus(json!({"Id": "b1"})).await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));
}

#[tokio::test]
async fn test_mismatched_id_is_invalid_response() {
    let server = MockRpcServer::with_handler(|_| {
        (200, json!({"jsonrpc": "2.0", "result": true, "id": 999_999}).to_string())
    })
    .await;
    let client = client_for(&server);

    let err = client.set_bonus(json!({"Id": "b1"})).await.unwrap_err();
    match err {
        Error::InvalidResponse(msg) => assert!(msg.contains("999999")),
        other => panic!("expected InvalidResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let mut server = MockRpcServer::new().await;
    let client = client_for(&server);

    let err = client.set_player(json!({"Id": "p1"})).await.unwrap_err();
    assert!(err.is_validation());

    server.shutdown();
    assert!(server.next_request().await.is_none());
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let url = {
        let server = MockRpcServer::new().await;
        server.url()
    };
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = ClientBuilder::new(url).timeout(2).build().unwrap();
    let err = client.set_bonus(json!({"Id": "b1"})).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_transport_used_directly() {
    let mut server = MockRpcServer::with_handler(|request| rpc_result(&request, json!("pong"))).await;
    let url = server.url();
    let transport = HttpTransport::new(&url, &ClientConfig::new(url.clone())).unwrap();

    let mut params = mascot_core::Params::new();
    params.insert("Echo".to_string(), json!(1));
    let result = transport.execute("Debug.Ping", params).await.unwrap();

    assert_eq!(result, json!("pong"));
    assert_eq!(server.next_request().await.unwrap()["method"], "Debug.Ping");
}

#[tokio::test]
async fn test_debug_logs_request_and_response_bodies() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let server = MockRpcServer::with_handler(|request| rpc_result(&request, json!({"Token": "t-1"}))).await;

    let quiet = client_for(&server);
    quiet
        .get_history_token(json!({"SessionId": "quiet-session", "ExpiryInSeconds": 60}))
        .await
        .unwrap();
    assert!(!logs.contents().contains("==> Request"));

    let verbose = ClientBuilder::new(server.url()).debug(true).build().unwrap();
    verbose
        .get_history_token(json!({"SessionId": "s1", "ExpiryInSeconds": 60}))
        .await
        .unwrap();

    let output = logs.contents();
    assert!(output.contains("==> Request"), "logs were {}", output);
    assert!(output.contains(r#""method":"History.GetToken""#), "logs were {}", output);
    assert!(output.contains(r#""SessionId":"s1""#), "logs were {}", output);
    assert!(output.contains("<== Response"), "logs were {}", output);
    assert!(output.contains(r#""Token":"t-1""#), "logs were {}", output);
    assert!(!output.contains("quiet-session"));
}

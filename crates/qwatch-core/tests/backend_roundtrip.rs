//! Integration tests for `BackendClient` and the poller against a real HTTP
//! listener.
//!
//! The fake backend is a minimal HTTP/1.1 responder on an ephemeral port.
//! Each test supplies a route function mapping `(path, json body)` to a
//! status code and a response body.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use qwatch_core::alert::{RemoteSoundSource, SoundSource};
use qwatch_core::{
    ApiError, BackendClient, Gate, Glyph, MutedDispatcher, Poller, PollerState, QueryStatus,
    Session, SessionStore, TransportError,
};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

type Route = fn(&str, &Value) -> (u16, Vec<u8>);

struct FakeBackend {
    url: String,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl FakeBackend {
    async fn start(route: Route) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let log = Arc::clone(&log);
                tokio::spawn(async move { serve(stream, route, log).await });
            }
        });

        Self { url, requests }
    }

    fn client(&self) -> BackendClient {
        BackendClient::new(&self.url, Duration::from_secs(5)).unwrap()
    }

    fn paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn last_body(&self) -> Value {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, body)| body.clone())
            .unwrap_or(Value::Null)
    }
}

async fn serve(mut stream: TcpStream, route: Route, log: Arc<Mutex<Vec<(String, Value)>>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body: Value = serde_json::from_slice(&buf[header_end..]).unwrap_or(Value::Null);
    let (status, payload) = route(&path, &body);
    log.lock().unwrap().push((path, body));

    let head = format!(
        "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
         Connection: close\r\n\r\n",
        payload.len()
    );
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(&payload).await;
    let _ = stream.shutdown().await;
}

fn ok_json(value: Value) -> (u16, Vec<u8>) {
    (200, value.to_string().into_bytes())
}

fn denied() -> (u16, Vec<u8>) {
    ok_json(json!({"success": false, "msg": "Access Denied"}))
}

fn session() -> Session {
    Session {
        username: "ana".to_string(),
        token: "t0k".to_string(),
    }
}

fn dashboard_route(path: &str, body: &Value) -> (u16, Vec<u8>) {
    if body["token"] != "t0k" {
        return denied();
    }
    match path {
        "/get_dashboard" | "/get_all_queries" => ok_json(json!({
            "1": {
                "uid": 1,
                "alias": "Tickets",
                "url": "https://tickets.example",
                "found": "true",
                "is_new": true,
                "status": 0,
                "alert_sound": "bell.wav",
                "cycles": "4",
                "cycles_limit": 0,
                "interval": "00:15:00"
            },
            "2": {
                "uid": "2",
                "url": "https://parked.example",
                "found": false,
                "status": 9,
                "cycles_limit": -1
            }
        })),
        "/get_query" if body["uid"] == "1" => ok_json(json!({
            "uid": "1",
            "alias": "Tickets",
            "url": "https://tickets.example",
            "found": true
        })),
        "/get_query" => ok_json(json!({"success": false, "msg": "Query not found"})),
        "/save" => ok_json(json!({"success": true, "msg": "Saved"})),
        "/delete_query" => ok_json(json!({"success": false})),
        _ => (404, b"{}".to_vec()),
    }
}

#[tokio::test]
async fn test_dashboard_decodes_lenient_snapshot() {
    let backend = FakeBackend::start(dashboard_route).await;
    let snapshot = backend.client().dashboard(&session()).await.unwrap();

    assert_eq!(snapshot.len(), 2);
    let tickets = &snapshot["1"];
    assert_eq!(tickets.uid, "1");
    assert!(tickets.found);
    assert!(tickets.is_new);
    assert_eq!(tickets.status, QueryStatus::Ok);
    assert_eq!(tickets.cycles, Some(4));
    assert_eq!(tickets.interval.to_string(), "00:15:00");

    let parked = &snapshot["2"];
    assert!(parked.is_disabled());
    assert_eq!(parked.status, QueryStatus::Unknown(9));
    assert_eq!(parked.status.label(), "Unknown");

    assert_eq!(backend.paths(), vec!["/get_dashboard"]);
    assert_eq!(backend.last_body(), json!({"username": "ana", "token": "t0k"}));
}

#[tokio::test]
async fn test_denial_envelope_is_auth_expired() {
    let backend = FakeBackend::start(dashboard_route).await;
    let stale = Session {
        username: "ana".to_string(),
        token: "old".to_string(),
    };

    let result = backend.client().dashboard(&stale).await;
    assert!(matches!(result, Err(ref e) if e.is_auth_expired()));
}

#[tokio::test]
async fn test_query_lookup_and_rejections() {
    let backend = FakeBackend::start(dashboard_route).await;
    let client = backend.client();

    let query = client.query(&session(), "1").await.unwrap();
    assert_eq!(query.display_name(), "Tickets");
    assert_eq!(
        backend.last_body(),
        json!({"username": "ana", "token": "t0k", "uid": "1"})
    );

    let missing = client.query(&session(), "42").await;
    assert!(matches!(
        missing,
        Err(ApiError::Rejected { ref message }) if message == "Query not found"
    ));

    assert_eq!(client.save(&session()).await.unwrap(), "Saved");
    assert!(matches!(
        client.delete_query(&session(), "1").await,
        Err(ApiError::Rejected { ref message }) if message == "request failed"
    ));
}

#[tokio::test]
async fn test_http_error_status_is_transport_error() {
    let backend = FakeBackend::start(|_, _| (500, b"boom".to_vec())).await;
    let result = backend.client().dashboard(&session()).await;

    assert!(matches!(
        result,
        Err(ApiError::Transport(TransportError::Status { status: 500, .. }))
    ));
}

#[tokio::test]
async fn test_unreachable_backend_is_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = BackendClient::new(&url, Duration::from_secs(2)).unwrap();
    let result = client.ping().await;
    assert!(matches!(
        result,
        Err(ApiError::Transport(TransportError::Request { .. }))
    ));
}

#[tokio::test]
async fn test_login_gate() {
    fn route(_: &str, body: &Value) -> (u16, Vec<u8>) {
        if body["password"] == "hunter2" {
            ok_json(json!({"username": "ana", "token": "fresh", "auth_success": true}))
        } else {
            ok_json(json!({"auth_success": false}))
        }
    }
    let backend = FakeBackend::start(route).await;
    let client = backend.client();

    match client.login("ana", "hunter2").await.unwrap() {
        Gate::Authorized(session) => {
            assert_eq!(session.username, "ana");
            assert_eq!(session.token, "fresh");
        }
        Gate::Denied => panic!("expected login to succeed"),
    }
    assert!(client.login("ana", "wrong").await.unwrap().is_denied());
    assert_eq!(backend.paths(), vec!["/auth", "/auth"]);
}

#[tokio::test]
async fn test_ping() {
    let backend = FakeBackend::start(|path, _| match path {
        "/ping" => ok_json(json!({"success": true})),
        _ => (404, Vec::new()),
    })
    .await;
    assert!(backend.client().ping().await.unwrap());
}

#[tokio::test]
async fn test_sound_bytes_and_envelopes() {
    fn route(_: &str, body: &Value) -> (u16, Vec<u8>) {
        match body["alert_sound"].as_str() {
            Some("bell.wav") => (200, b"RIFF\x00\x01WAVE".to_vec()),
            Some("stale.wav") => denied(),
            _ => ok_json(json!({"success": false, "msg": "Sound not found"})),
        }
    }
    let backend = FakeBackend::start(route).await;
    let client = backend.client();

    let bytes = client.sound(&session(), "bell.wav").await.unwrap();
    assert!(bytes.starts_with(b"RIFF"));

    assert!(matches!(
        client.sound(&session(), "gone.wav").await,
        Err(ApiError::Rejected { ref message }) if message == "Sound not found"
    ));
    assert!(matches!(
        client.sound(&session(), "stale.wav").await,
        Err(ref e) if e.is_auth_expired()
    ));
}

#[tokio::test]
async fn test_remote_sounds_are_fetched_once_then_cached() {
    fn route(_: &str, body: &Value) -> (u16, Vec<u8>) {
        match body["alert_sound"].as_str() {
            Some("bell.wav") => (200, b"RIFF\x00\x01WAVE".to_vec()),
            _ => ok_json(json!({"success": false, "msg": "Sound not found"})),
        }
    }
    let backend = FakeBackend::start(route).await;
    let cache = tempfile::TempDir::new().unwrap();
    let sounds = cache.path().join("sounds");
    let source = RemoteSoundSource::new(
        backend.client(),
        SessionStore::new(Some(session())),
        sounds.clone(),
    );

    let first = source.load("bell.wav").await.unwrap();
    let second = source.load("bell.wav").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read(sounds.join("bell.wav")).unwrap(), first);
    assert_eq!(backend.paths(), vec!["/get_sound"]);

    assert!(source.load("gone.wav").await.is_err());
    assert!(!sounds.join("gone.wav").exists());
}

#[tokio::test]
async fn test_poller_publishes_backend_board() {
    let backend = FakeBackend::start(dashboard_route).await;
    let store = SessionStore::new(Some(session()));
    let poller = Poller::new(
        backend.client(),
        Arc::new(MutedDispatcher),
        Duration::from_secs(60),
    );

    let handle = poller.mount(store.subscribe()).await;
    assert_eq!(handle.state(), PollerState::Active);

    let board = handle.board();
    assert_eq!(board.rows.len(), 1);
    assert_eq!(board.rows[0].name, "Tickets");
    assert_eq!(board.rows[0].glyph, Glyph::Bang);
    assert!(board.unnotified_new);

    handle.join().await;
}

#[tokio::test]
async fn test_poller_stops_when_backend_rejects_session() {
    let backend = FakeBackend::start(|_, _| denied()).await;
    let store = SessionStore::new(Some(session()));
    let poller = Poller::new(
        backend.client(),
        Arc::new(MutedDispatcher),
        Duration::from_secs(60),
    );

    let handle = poller.mount(store.subscribe()).await;
    assert_eq!(handle.state(), PollerState::Stopped);
    assert!(handle.board().last_refresh.is_none());
}

//! End-to-end tests for the WebSocket message channel.
//!
//! Each test starts the real accept loop on an ephemeral localhost port,
//! backed by a [`RecordingSink`], and talks to it with a `tokio-tungstenite`
//! client the way the phone app does:
//!
//! ```text
//! client ──ws://127.0.0.1:<port>/ws──► serve() ──► InputEngine ──► RecordingSink
//!        ◄── hello / pong / error ────
//! ```
//!
//! Frames of one connection are processed strictly in order, so sending a
//! `ping` after a control event and waiting for the `pong` guarantees the
//! event has reached the sink.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use mobilemouse_core::{EngineConfig, HidKeyCode};
use mobilemouse_server::application::InputEngine;
use mobilemouse_server::infrastructure::action_sink::{RecordingSink, SinkAction};
use mobilemouse_server::infrastructure::screen_info::MockScreenEnumerator;
use mobilemouse_server::infrastructure::serve;
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(5);

/// A running server and the handles a test needs to observe it.
struct TestServer {
    addr: SocketAddr,
    sink: Arc<RecordingSink>,
    running: Arc<AtomicBool>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let sink = Arc::new(RecordingSink::new().with_cursor(100, 100));
        let engine = Arc::new(InputEngine::new(
            sink.clone(),
            Arc::new(MockScreenEnumerator::single_1080p()),
            EngineConfig::default(),
        ));
        let running = Arc::new(AtomicBool::new(true));

        tokio::spawn(serve(
            listener,
            "/ws".to_string(),
            engine,
            Arc::clone(&running),
        ));

        Self {
            addr,
            sink,
            running,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    /// Connects and consumes the greeting.
    async fn connect(&self) -> Client {
        let (mut ws, _resp) = connect_async(self.url("/ws")).await.expect("connect");
        let hello = next_json(&mut ws).await;
        assert_eq!(hello["type"], "hello");
        ws
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

async fn send_json(ws: &mut Client, value: Value) {
    ws.send(WsMessage::Text(value.to_string()))
        .await
        .expect("send");
}

/// Next text frame as JSON, skipping protocol-level frames.
async fn next_json(ws: &mut Client) -> Value {
    loop {
        let msg = timeout(WAIT, ws.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("read frame");
        if let WsMessage::Text(text) = msg {
            return serde_json::from_str(&text).expect("server sent invalid JSON");
        }
    }
}

/// Round-trips a ping so every earlier frame has been processed.
async fn sync(ws: &mut Client) {
    send_json(ws, json!({"type": "ping", "ts": "sync"})).await;
    let pong = next_json(ws).await;
    assert_eq!(pong, json!({"type": "pong", "ts": "sync"}));
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_greets_with_hello() {
    // Arrange
    let server = TestServer::start().await;

    // Act
    let (mut ws, _resp) = connect_async(server.url("/ws")).await.expect("connect");
    let hello = next_json(&mut ws).await;

    // Assert
    assert_eq!(
        hello,
        json!({
            "type": "hello",
            "serverVersion": "1.0.0",
            "features": ["mouse", "keyboard", "text", "gestures"]
        })
    );
}

#[tokio::test]
async fn test_ping_is_answered_with_matching_ts() {
    let server = TestServer::start().await;
    let mut ws = server.connect().await;

    send_json(&mut ws, json!({"type": "ping", "ts": 1712345678})).await;
    assert_eq!(
        next_json(&mut ws).await,
        json!({"type": "pong", "ts": 1712345678})
    );

    send_json(&mut ws, json!({"type": "ping"})).await;
    assert_eq!(next_json(&mut ws).await, json!({"type": "pong"}));
}

#[tokio::test]
async fn test_unknown_type_gets_unsupported_error() {
    let server = TestServer::start().await;
    let mut ws = server.connect().await;

    send_json(&mut ws, json!({"type": "warp_drive"})).await;

    assert_eq!(
        next_json(&mut ws).await,
        json!({
            "type": "error",
            "code": "UNSUPPORTED",
            "message": "Unknown type: warp_drive"
        })
    );
}

#[tokio::test]
async fn test_malformed_frames_are_dropped_and_connection_survives() {
    // Arrange
    let server = TestServer::start().await;
    let mut ws = server.connect().await;

    // Act
    ws.send(WsMessage::Text("{not json".to_string()))
        .await
        .expect("send");
    send_json(&mut ws, json!({"dx": 5})).await;
    send_json(&mut ws, json!({"type": "mouse_move", "dx": "left"})).await;

    // Assert: no reply to any of them, and the next ping still works.
    sync(&mut ws).await;
    assert!(server.sink.actions().is_empty());
}

#[tokio::test]
async fn test_mouse_move_reaches_the_sink() {
    // Arrange
    let server = TestServer::start().await;
    let mut ws = server.connect().await;

    // Act
    send_json(&mut ws, json!({"type": "mouse_move", "dx": 12.4, "dy": -7.6})).await;
    sync(&mut ws).await;

    // Assert
    assert_eq!(server.sink.actions(), vec![SinkAction::MoveTo(112, 92)]);
}

#[tokio::test]
async fn test_text_input_is_typed_in_order() {
    let server = TestServer::start().await;
    let mut ws = server.connect().await;

    send_json(&mut ws, json!({"type": "text_input", "text": "ok 👍"})).await;
    sync(&mut ws).await;

    assert_eq!(server.sink.replay_us_text(), "ok 👍");
}

#[tokio::test]
async fn test_wrong_path_is_refused() {
    // Arrange
    let server = TestServer::start().await;

    // Act
    let result = connect_async(server.url("/other")).await;

    // Assert
    match result {
        Err(WsError::Http(resp)) => assert_eq!(resp.status(), 404),
        Err(e) => panic!("expected an HTTP 404 refusal, got {e}"),
        Ok(_) => panic!("upgrade on the wrong path must be refused"),
    }
}

#[tokio::test]
async fn test_closing_connection_releases_held_modifiers() {
    // Arrange: ctrl+a down, then hang up without the key up.
    let server = TestServer::start().await;
    let mut ws = server.connect().await;
    send_json(
        &mut ws,
        json!({"type": "key_event", "key": "a", "action": "down", "mod": {"ctrl": true}}),
    )
    .await;
    sync(&mut ws).await;
    assert_eq!(
        server.sink.actions(),
        vec![
            SinkAction::KeyDown(HidKeyCode::ControlLeft),
            SinkAction::KeyDown(HidKeyCode::KeyA),
        ]
    );

    // Act
    ws.close(None).await.expect("close");

    // Assert: the flush runs on the server after the close is read.
    let released = timeout(WAIT, async {
        loop {
            if server
                .sink
                .actions()
                .contains(&SinkAction::KeyUp(HidKeyCode::ControlLeft))
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    assert!(released.is_ok(), "ctrl was never released");
}

#[tokio::test]
async fn test_two_clients_are_served_concurrently() {
    let server = TestServer::start().await;
    let mut first = server.connect().await;
    let mut second = server.connect().await;

    send_json(&mut second, json!({"type": "tap"})).await;
    sync(&mut second).await;
    send_json(&mut first, json!({"type": "long_press"})).await;
    sync(&mut first).await;

    assert_eq!(server.sink.actions().len(), 4);
}

//! WebSocket server: accept loop and per-connection sessions.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Upgrading each connection to a WebSocket, refusing any request path
//!    other than the configured one (default `/ws`).
//! 3. Greeting the phone with a `hello` frame.
//! 4. Decoding every text frame and either answering it (`ping`, unknown
//!    type) or handing the control event to the shared [`InputEngine`].
//! 5. Releasing the connection's held modifiers when it closes.
//! 6. Stopping the accept loop when the `running` flag is cleared.
//!
//! # Blocking work
//!
//! The engine is synchronous: a double tap sleeps between its clicks and the
//! native sink talks to the OS directly.  Each event therefore runs on a
//! Tokio blocking worker via `spawn_blocking`, and the session awaits it
//! before reading the next frame, so one connection's events never overlap.
//!
//! # Failure policy
//!
//! - Malformed frames are logged and dropped; the phone gets no reply.
//! - A failed sink call abandons that one event; the connection stays open.
//! - A failed handshake or a broken socket ends only that session.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use mobilemouse_core::{decode_client_message, ControlEvent, DecodeError, Inbound, ServerMessage};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_hdr_async,
    tungstenite::{
        handshake::server::{ErrorResponse, Request, Response},
        http::StatusCode,
        Error as WsError, Message as WsMessage,
    },
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::{InputEngine, SessionState};

/// How often the accept loop wakes up to check the shutdown flag.
const ACCEPT_POLL: Duration = Duration::from_millis(200);

/// Where and how the message channel listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Socket address for the TCP listener.
    pub bind_addr: SocketAddr,
    /// Request path that WebSocket upgrades must use.
    pub path: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Binds `config.bind_addr` and serves connections until `running` is
/// cleared.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot be bound (port in use, no
/// permission).
pub async fn run_server(
    config: ChannelConfig,
    engine: Arc<InputEngine>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind WebSocket listener on {}", config.bind_addr))?;

    info!(
        "MobileMouse listening on ws://{}{}",
        config.bind_addr, config.path
    );

    serve(listener, config.path, engine, running).await
}

/// Runs the accept loop on an already-bound listener.
///
/// Split out from [`run_server`] so callers can bind port `0` and read the
/// chosen port back before serving.
///
/// # Errors
///
/// Currently never fails; accept errors are logged and the loop continues.
pub async fn serve(
    listener: TcpListener,
    path: String,
    engine: Arc<InputEngine>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let path: Arc<str> = Arc::from(path);

    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        match timeout(ACCEPT_POLL, listener.accept()).await {
            Ok(Ok((stream, peer_addr))) => {
                debug!("new connection from {peer_addr}");
                let path = Arc::clone(&path);
                let engine = Arc::clone(&engine);
                tokio::spawn(async move {
                    handle_client_session(stream, peer_addr, path, engine).await;
                });
            }
            Ok(Err(e)) => {
                error!("accept error: {e}");
            }
            Err(_) => {
                // Timeout: loop back to check the running flag.
            }
        }
    }

    Ok(())
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Task entry point for one connection; logs how it ended.
async fn handle_client_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    path: Arc<str>,
    engine: Arc<InputEngine>,
) {
    match run_session(raw_stream, peer_addr, path, engine).await {
        Ok(()) => info!("session {peer_addr} closed normally"),
        Err(e) => warn!("session {peer_addr} closed with error: {e:#}"),
    }
}

/// Handshake, greeting, frame loop, then modifier flush.
///
/// The flush runs whether the frame loop ended cleanly or not.
async fn run_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    path: Arc<str>,
    engine: Arc<InputEngine>,
) -> anyhow::Result<()> {
    let expected = Arc::clone(&path);
    let check_path = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        if req.uri().path() == &*expected {
            Ok(resp)
        } else {
            Err(not_found(req.uri().path()))
        }
    };

    let mut ws_stream = accept_hdr_async(raw_stream, check_path)
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    let session = Arc::new(Mutex::new(SessionState::new()));
    let session_id = lock_session(&session).id();
    info!(%session_id, "session established with {peer_addr}");

    let outcome = pump_frames(&mut ws_stream, &engine, &session, session_id).await;

    flush_session(&engine, &session, session_id).await;
    outcome
}

/// Reads frames until the client goes away.
///
/// Generic over the socket so the loop does not care whether it runs on a
/// plain or split stream.
async fn pump_frames<S>(
    ws: &mut S,
    engine: &Arc<InputEngine>,
    session: &Arc<Mutex<SessionState>>,
    session_id: Uuid,
) -> anyhow::Result<()>
where
    S: Stream<Item = Result<WsMessage, WsError>> + Sink<WsMessage, Error = WsError> + Unpin,
{
    send_message(ws, &ServerMessage::hello())
        .await
        .context("failed to send hello")?;

    loop {
        let ws_msg = match ws.next().await {
            Some(Ok(msg)) => msg,
            Some(Err(WsError::ConnectionClosed | WsError::Protocol(_))) => {
                debug!(%session_id, "client WebSocket closed");
                break;
            }
            Some(Err(e)) => {
                return Err(e).context("WebSocket read failed");
            }
            None => {
                debug!(%session_id, "client stream ended");
                break;
            }
        };

        match ws_msg {
            WsMessage::Text(text) => match classify_frame(&text, session_id) {
                FrameOutcome::Reply(reply) => {
                    send_message(ws, &reply)
                        .await
                        .context("failed to send reply")?;
                }
                FrameOutcome::Dispatch(event) => {
                    dispatch(engine, session, session_id, event).await?;
                }
                FrameOutcome::Nothing => {}
            },
            WsMessage::Binary(data) => {
                warn!(%session_id, "unexpected binary frame ({} bytes, ignored)", data.len());
            }
            WsMessage::Ping(_) | WsMessage::Pong(_) => {
                // tungstenite answers protocol pings on the next write.
            }
            WsMessage::Close(_) => {
                debug!(%session_id, "close frame received");
                break;
            }
            WsMessage::Frame(_) => {
                debug!(%session_id, "raw frame (ignored)");
            }
        }
    }

    Ok(())
}

// ── Frame classification ──────────────────────────────────────────────────────

/// What the session loop should do with one text frame.
#[derive(Debug, PartialEq)]
enum FrameOutcome {
    /// Answer the client.
    Reply(ServerMessage),
    /// Run an event through the engine.
    Dispatch(ControlEvent),
    /// Drop the frame.
    Nothing,
}

fn classify_frame(text: &str, session_id: Uuid) -> FrameOutcome {
    match decode_client_message(text) {
        Ok(Inbound::Hello) => {
            debug!(%session_id, "client hello");
            FrameOutcome::Nothing
        }
        Ok(Inbound::Ping { ts }) => FrameOutcome::Reply(ServerMessage::Pong { ts }),
        Ok(Inbound::Control(event)) => FrameOutcome::Dispatch(event),
        Ok(Inbound::Ignored { type_name }) => {
            debug!(%session_id, "{type_name} message asks for nothing");
            FrameOutcome::Nothing
        }
        Err(DecodeError::Unsupported { type_name }) => {
            debug!(%session_id, "unsupported message type {type_name:?}");
            FrameOutcome::Reply(ServerMessage::unsupported(&type_name))
        }
        Err(e) => {
            warn!(%session_id, "dropping malformed frame: {e}");
            FrameOutcome::Nothing
        }
    }
}

// ── Engine bridge ─────────────────────────────────────────────────────────────

/// Runs one event on a blocking worker and waits for it.
///
/// # Errors
///
/// Only a panicked worker ends the session; sink failures are logged.
async fn dispatch(
    engine: &Arc<InputEngine>,
    session: &Arc<Mutex<SessionState>>,
    session_id: Uuid,
    event: ControlEvent,
) -> anyhow::Result<()> {
    let kind = event.kind();
    let engine = Arc::clone(engine);
    let session = Arc::clone(session);

    let result = tokio::task::spawn_blocking(move || {
        let mut state = lock_session(&session);
        engine.handle(&mut state, &event)
    })
    .await
    .with_context(|| format!("input worker panicked while handling {kind}"))?;

    if let Err(e) = result {
        warn!(%session_id, "{kind} abandoned: {e}");
    }
    Ok(())
}

/// Releases whatever modifiers the session still holds.
async fn flush_session(
    engine: &Arc<InputEngine>,
    session: &Arc<Mutex<SessionState>>,
    session_id: Uuid,
) {
    let engine = Arc::clone(engine);
    let session = Arc::clone(session);

    let result = tokio::task::spawn_blocking(move || {
        let mut state = lock_session(&session);
        engine.end_session(&mut state)
    })
    .await;

    match result {
        Ok(Ok(())) => debug!(%session_id, "session state flushed"),
        Ok(Err(e)) => warn!(%session_id, "failed to release held modifiers: {e}"),
        Err(e) => error!(%session_id, "flush worker panicked: {e}"),
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn lock_session(session: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn send_message<S>(ws: &mut S, msg: &ServerMessage) -> anyhow::Result<()>
where
    S: Sink<WsMessage, Error = WsError> + Unpin,
{
    let json = msg.to_json().context("failed to encode server message")?;
    ws.send(WsMessage::Text(json)).await?;
    Ok(())
}

/// Handshake rejection for a request on the wrong path.
fn not_found(path: &str) -> ErrorResponse {
    debug!("refusing WebSocket upgrade on {path:?}");
    let mut resp = ErrorResponse::new(Some(format!("no WebSocket endpoint at {path}")));
    *resp.status_mut() = StatusCode::NOT_FOUND;
    resp
}

// ── Tests ─────────────────────────────────────────────────────────────────────

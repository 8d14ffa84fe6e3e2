//! WebSocket transport to the signing middleware.
//!
//! This module owns the single persistent connection.  It is the sole
//! writer to the socket and the sole source of read events; every other
//! component interacts with the connection only through this module's
//! contract.
//!
//! Responsibilities:
//!
//! 1. Dial the middleware's WebSocket endpoint and publish readiness
//!    transitions (`Disconnected → Connecting → Ready`) on a watch channel.
//! 2. Run a reader task that forwards inbound text frames to the dispatch
//!    layer over an `mpsc` channel.
//! 3. Filter the middleware's keep-alive sentinel (`--heartbeat--`) out of
//!    the stream *before* any JSON parsing is attempted, so the envelope
//!    parser never has to special-case non-JSON text.
//! 4. Tear the connection down deterministically on `close()` and on drop.
//!
//! # Error surface
//!
//! Socket errors and non-clean closures are logged and surfaced only as a
//! transition to `Disconnected` — never as panics or typed errors pushed at
//! the caller.  The one exception is [`Transport::send`]: the operation
//! that tried to write gets a [`TransportError`] back so it can fail the
//! call locally.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch, Mutex};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, Message as WsMessage},
    MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, info, warn};

use signer_protocol::HEARTBEAT_SENTINEL;

type WsConnection = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsConnection, WsMessage>;

/// Capacity of the inbound frame channel.  The protocol allows one
/// outstanding call, so the channel is never meaningfully full; the slack
/// absorbs unsolicited frames arriving while the dispatcher is busy.
const FRAME_CHANNEL_CAPACITY: usize = 64;

/// Connection state as observed by callers.
///
/// Only `Ready` permits issuing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No socket, or the previous socket has closed.
    Disconnected,
    /// Socket-open handshake in progress.
    Connecting,
    /// Socket open; operations may be issued.
    Ready,
}

/// Errors that can occur in the transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The WebSocket handshake with the middleware failed.
    #[error("failed to connect to middleware at {url}: {source}")]
    ConnectFailed {
        /// Endpoint that was dialled.
        url: String,
        /// Underlying tungstenite error.
        #[source]
        source: WsError,
    },
    /// The socket-open handshake did not complete within the configured
    /// connect timeout.
    #[error("connection to middleware at {url} timed out")]
    ConnectTimeout {
        /// Endpoint that was dialled.
        url: String,
    },
    /// A frame was submitted while no connection is established.
    #[error("connection is not established")]
    NotConnected,
    /// Writing a frame to the socket failed; the connection is torn down.
    #[error("websocket send failed: {0}")]
    Send(WsError),
}

/// Outbound half of the transport contract, as seen by the client facade.
///
/// The facade depends on this trait rather than on [`Transport`] directly
/// so its request/reply logic can be unit-tested against a mock channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutboundChannel: Send + Sync {
    /// Sends one outbound text frame to the middleware.
    async fn send_frame(&self, frame: String) -> Result<(), TransportError>;
}

/// Owns the WebSocket connection to the middleware.
///
/// Created via [`Transport::connect`], which also returns the inbound
/// frame receiver.  The reader task runs until the socket closes or the
/// transport is closed/dropped; all exit paths publish `Disconnected`.
pub struct Transport {
    /// Write half of the socket.  `None` once the connection is gone.
    sink: Arc<Mutex<Option<WsSink>>>,
    /// Publisher for readiness transitions.
    state_tx: Arc<watch::Sender<ConnectionState>>,
    /// Kept so the watch channel stays open while the transport lives.
    state_rx: watch::Receiver<ConnectionState>,
    /// Abort handle for the reader task.
    reader_abort: std::sync::Mutex<Option<tokio::task::AbortHandle>>,
}

impl Transport {
    /// Dials the middleware at `url` and starts the reader task.
    ///
    /// Returns the transport plus the channel on which inbound,
    /// heartbeat-filtered text frames are delivered.  The returned
    /// transport is already in the `Ready` state.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ConnectFailed`] if the socket-open
    /// handshake fails (middleware not running, TLS failure, bad URL).
    pub async fn connect(url: &str) -> Result<(Self, mpsc::Receiver<String>), TransportError> {
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        let state_tx = Arc::new(state_tx);

        // Readiness is defined purely by socket-open success; there is no
        // application-level handshake.
        let (ws, _response) = connect_async(url).await.map_err(|source| {
            let _ = state_tx.send(ConnectionState::Disconnected);
            TransportError::ConnectFailed {
                url: url.to_string(),
                source,
            }
        })?;

        info!("connected to middleware at {url}");

        let (sink, stream) = ws.split();
        let sink = Arc::new(Mutex::new(Some(sink)));

        let (frame_tx, frame_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);

        let reader = tokio::spawn(read_middleware_frames(
            stream,
            frame_tx,
            Arc::clone(&sink),
            Arc::clone(&state_tx),
        ));

        let _ = state_tx.send(ConnectionState::Ready);

        Ok((
            Self {
                sink,
                state_tx,
                state_rx,
                reader_abort: std::sync::Mutex::new(Some(reader.abort_handle())),
            },
            frame_rx,
        ))
    }

    /// Returns the current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Returns a watch receiver for readiness transitions.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Tears the connection down deterministically.
    ///
    /// Sends a Close frame on a best-effort basis, stops the reader task,
    /// and publishes `Disconnected`.  Safe to call more than once.
    pub async fn close(&self) {
        if let Some(mut sink) = self.sink.lock().await.take() {
            if let Err(e) = sink.send(WsMessage::Close(None)).await {
                debug!("close frame send failed: {e}");
            }
        }
        self.stop_reader();
        let _ = self.state_tx.send(ConnectionState::Disconnected);
        info!("middleware connection closed");
    }

    fn stop_reader(&self) {
        // The std Mutex is held only for this take; never across an await.
        let handle = self
            .reader_abort
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        // Dropping the transport must end the reader task as well; the
        // state channel closes with us, so no transition is published.
        self.stop_reader();
    }
}

#[async_trait]
impl OutboundChannel for Transport {
    async fn send_frame(&self, frame: String) -> Result<(), TransportError> {
        let mut guard = self.sink.lock().await;
        let sink = guard.as_mut().ok_or(TransportError::NotConnected)?;
        match sink.send(WsMessage::Text(frame)).await {
            Ok(()) => Ok(()),
            Err(e) => {
                // A failed write means the connection is unusable; drop the
                // sink and let callers observe the readiness transition.
                guard.take();
                let _ = self.state_tx.send(ConnectionState::Disconnected);
                Err(TransportError::Send(e))
            }
        }
    }
}

// ── Reader task ───────────────────────────────────────────────────────────────

/// Reads frames from the middleware until the socket closes.
///
/// Text frames are forwarded on `frame_tx` — except the keep-alive
/// sentinel, which is recognised by exact string match and dropped here so
/// it never reaches the envelope parser.  Binary and protocol-level
/// ping/pong frames are not part of the middleware protocol and never
/// reach the dispatch layer either.
///
/// On every exit path the sink is cleared and `Disconnected` is published.
async fn read_middleware_frames(
    mut stream: SplitStream<WsConnection>,
    frame_tx: mpsc::Sender<String>,
    sink: Arc<Mutex<Option<WsSink>>>,
    state_tx: Arc<watch::Sender<ConnectionState>>,
) {
    loop {
        match stream.next().await {
            Some(Ok(WsMessage::Text(text))) => {
                if text == HEARTBEAT_SENTINEL {
                    debug!("heartbeat frame dropped");
                    continue;
                }
                if frame_tx.send(text).await.is_err() {
                    debug!("frame channel closed; stopping reader");
                    break;
                }
            }
            Some(Ok(WsMessage::Binary(data))) => {
                // The middleware protocol is text-only.
                warn!("unexpected binary frame ({} bytes) ignored", data.len());
            }
            Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_))) => {
                // Protocol-level keep-alive, distinct from the application
                // heartbeat sentinel; tungstenite answers pings on write.
            }
            Some(Ok(WsMessage::Close(_))) => {
                debug!("middleware sent Close frame");
                break;
            }
            Some(Ok(WsMessage::Frame(_))) => {
                debug!("raw frame ignored");
            }
            Some(Err(WsError::ConnectionClosed | WsError::Protocol(_))) => {
                debug!("middleware connection closed");
                break;
            }
            Some(Err(e)) => {
                warn!("websocket read error: {e}");
                break;
            }
            None => {
                debug!("middleware stream ended");
                break;
            }
        }
    }

    sink.lock().await.take();
    let _ = state_tx.send(ConnectionState::Disconnected);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
//
// The reader loop and readiness transitions need a live socket on both
// ends, so they are exercised by the integration tests in
// `tests/call_integration.rs` against an in-process WebSocket server.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_state_equality() {
        assert_eq!(ConnectionState::Ready, ConnectionState::Ready);
        assert_ne!(ConnectionState::Ready, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_endpoint_fails() {
        // Arrange: claim an ephemeral port, then free it so the dial
        // finds nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = Transport::connect(&format!("ws://127.0.0.1:{port}/")).await;

        // Assert: a connect failure, not a panic or a hang.
        assert!(matches!(
            result,
            Err(TransportError::ConnectFailed { .. })
        ));
    }

    #[test]
    fn test_heartbeat_sentinel_exact_match_only() {
        // The filter uses exact string equality; near-misses are ordinary
        // frames that must flow through to the parser (and fail there).
        assert_ne!("--heartbeat-- ", HEARTBEAT_SENTINEL);
        assert_ne!("--HEARTBEAT--", HEARTBEAT_SENTINEL);
        assert_eq!("--heartbeat--", HEARTBEAT_SENTINEL);
    }
}

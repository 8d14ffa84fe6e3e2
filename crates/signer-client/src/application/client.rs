//! The `SignerClient` facade: one async method per remote operation.
//!
//! Each method follows the same shape:
//!
//! 1. Build the request frame through the operation catalog (argument
//!    validation happens here, before any I/O).
//! 2. Register the operation's tag with the [`Correlator`] — this fails
//!    fast if another call is still outstanding.
//! 3. Send the frame and await the reply envelope, bounded by the
//!    configured call timeout.
//! 4. Check the envelope: success yields the typed result; a non-zero
//!    error code is classified against the set of validation categories
//!    this operation treats as expected.
//!
//! The per-tag callback of the wire contract is expressed as awaiting a
//! oneshot receiver: the caller that issued the operation is the only
//! party that can observe its reply.
//!
//! # Dispatch loop
//!
//! A spawned task drains the transport's frame channel, parses each frame
//! into a [`ResponseEnvelope`], and feeds the correlator.  Malformed frames
//! are logged and discarded there — they never reach a waiting caller.
//! When the channel closes (connection gone), the loop aborts any pending
//! call so its caller fails with [`CallError::ConnectionLost`] instead of
//! hanging.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::time::timeout;
use tracing::{debug, warn};

use signer_protocol::protocol::catalog;
use signer_protocol::{
    CatalogError, Classification, OperationTag, RequestFrame, ResponseEnvelope,
    ValidationCategory,
};

use crate::application::correlator::{Correlator, ProtocolMisuseError};
use crate::domain::config::ClientConfig;
use crate::infrastructure::transport::{
    ConnectionState, OutboundChannel, Transport, TransportError,
};

/// Errors surfaced by the per-operation facade methods.
#[derive(Debug, Error)]
pub enum CallError {
    /// The connection is not in the `Ready` state; no frame was sent.
    #[error("connection is not ready (state: {0:?})")]
    NotReady(ConnectionState),

    /// A call was issued while another was still pending; no frame was sent.
    #[error(transparent)]
    Misuse(#[from] ProtocolMisuseError),

    /// A required argument was missing; no frame was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CatalogError),

    /// The frame could not be written to the socket.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The connection dropped while the call was awaiting its reply.
    #[error("connection lost while awaiting the reply")]
    ConnectionLost,

    /// No reply arrived within the configured call timeout.
    #[error("no reply from the middleware within {0:?}")]
    Timeout(Duration),

    /// The middleware reported a failure the caller declared expected.
    #[error("{message}")]
    Validation {
        /// The classified category.
        category: ValidationCategory,
        /// User-facing, category-specific message.
        message: String,
    },

    /// The middleware reported a failure the caller did not anticipate.
    #[error("{message}")]
    Middleware {
        /// Raw middleware error code, for diagnostics.
        error_code: i64,
        /// Generic message.
        message: String,
    },
}

/// Client facade over the middleware connection.
///
/// Create one with [`SignerClient::connect`]; issue operations through the
/// per-operation methods.  The facade enforces the single-outstanding-call
/// invariant: concurrent calls on clones of an `Arc<SignerClient>` are
/// rejected with [`CallError::Misuse`] rather than silently interleaved.
pub struct SignerClient {
    channel: Arc<dyn OutboundChannel>,
    correlator: Arc<Mutex<Correlator>>,
    state_rx: watch::Receiver<ConnectionState>,
    config: ClientConfig,
    /// Present when built over a real connection; `None` in unit tests.
    transport: Option<Arc<Transport>>,
    dispatch_abort: std::sync::Mutex<Option<tokio::task::AbortHandle>>,
}

impl SignerClient {
    /// Connects to the middleware described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the socket-open handshake fails or
    /// does not complete within `config.connect_timeout`.
    pub async fn connect(config: ClientConfig) -> Result<Self, TransportError> {
        let dial = Transport::connect(&config.endpoint_url);
        let (transport, frames) = match timeout(config.connect_timeout, dial).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(TransportError::ConnectTimeout {
                    url: config.endpoint_url.clone(),
                })
            }
        };
        let transport = Arc::new(transport);
        let state_rx = transport.subscribe();
        let channel: Arc<dyn OutboundChannel> = transport.clone();
        Ok(Self::from_parts(
            channel,
            frames,
            state_rx,
            config,
            Some(transport),
        ))
    }

    /// Wires a facade over its parts and spawns the dispatch loop.
    fn from_parts(
        channel: Arc<dyn OutboundChannel>,
        frames: mpsc::Receiver<String>,
        state_rx: watch::Receiver<ConnectionState>,
        config: ClientConfig,
        transport: Option<Arc<Transport>>,
    ) -> Self {
        let correlator = Arc::new(Mutex::new(Correlator::new()));
        let dispatch = tokio::spawn(run_dispatch_loop(frames, Arc::clone(&correlator)));
        Self {
            channel,
            correlator,
            state_rx,
            config,
            transport,
            dispatch_abort: std::sync::Mutex::new(Some(dispatch.abort_handle())),
        }
    }

    /// Returns the current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// True when operations may be issued.
    pub fn ready(&self) -> bool {
        self.state() == ConnectionState::Ready
    }

    /// Returns a watch receiver for readiness transitions, so callers can
    /// gate operations on `Ready` without polling.
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Closes the connection and discards any pending call.
    pub async fn close(&self) {
        if let Some(transport) = &self.transport {
            transport.close().await;
        }
        if let Some(tag) = self.correlator.lock().await.abort() {
            debug!("pending {tag} discarded on close");
        }
    }

    // ── Operations ────────────────────────────────────────────────────────────

    /// Browses a key-store directory listing.  Pass an empty `current_path`
    /// to list from the storage root.
    pub async fn browse_key_store(
        &self,
        alias: &str,
        store_type: &str,
        current_path: &str,
    ) -> Result<String, CallError> {
        let (frame, tag) = catalog::browse_key_store(alias, store_type, current_path)?;
        let envelope = checked(self.call(frame, tag).await?, &HashSet::new())?;
        Ok(envelope.result().unwrap_or_default().to_string())
    }

    /// Enumerates keys in a store, returning one listing entry per key.
    ///
    /// Expected failures: wrong password, attempts exhausted, unsupported
    /// key type.
    pub async fn get_keys(
        &self,
        alias: &str,
        path: &str,
        password: &str,
        key_type_filter: &str,
    ) -> Result<Vec<String>, CallError> {
        let (frame, tag) = catalog::get_keys(alias, path, password, key_type_filter)?;
        let mut accepted = password_categories();
        let _ = accepted.insert(ValidationCategory::UnsupportedKeyType);
        let envelope = checked(self.call(frame, tag).await?, &accepted)?;
        Ok(split_key_listing(envelope.result().unwrap_or_default()))
    }

    /// Switches the middleware's message locale.
    pub async fn set_locale(&self, language_code: &str) -> Result<(), CallError> {
        let (frame, tag) = catalog::set_locale(language_code)?;
        let _ = checked(self.call(frame, tag).await?, &HashSet::new())?;
        Ok(())
    }

    /// Reads the certificate validity start date.
    pub async fn get_not_before(
        &self,
        alias: &str,
        path: &str,
        key_alias: &str,
        password: &str,
    ) -> Result<String, CallError> {
        let (frame, tag) = catalog::get_not_before(alias, path, key_alias, password)?;
        self.certificate_field(frame, tag).await
    }

    /// Reads the certificate validity end date.
    pub async fn get_not_after(
        &self,
        alias: &str,
        path: &str,
        key_alias: &str,
        password: &str,
    ) -> Result<String, CallError> {
        let (frame, tag) = catalog::get_not_after(alias, path, key_alias, password)?;
        self.certificate_field(frame, tag).await
    }

    /// Reads the certificate subject distinguished name.
    pub async fn get_subject_dn(
        &self,
        alias: &str,
        path: &str,
        key_alias: &str,
        password: &str,
    ) -> Result<String, CallError> {
        let (frame, tag) = catalog::get_subject_dn(alias, path, key_alias, password)?;
        self.certificate_field(frame, tag).await
    }

    /// Reads the certificate issuer distinguished name.
    pub async fn get_issuer_dn(
        &self,
        alias: &str,
        path: &str,
        key_alias: &str,
        password: &str,
    ) -> Result<String, CallError> {
        let (frame, tag) = catalog::get_issuer_dn(alias, path, key_alias, password)?;
        self.certificate_field(frame, tag).await
    }

    /// Looks up one RDN component of the subject DN by OID.
    ///
    /// Expected failures: password problems plus a malformed OID.
    pub async fn get_rdn_by_oid(
        &self,
        alias: &str,
        path: &str,
        key_alias: &str,
        password: &str,
        oid: &str,
        occurrence_index: u32,
    ) -> Result<String, CallError> {
        let (frame, tag) =
            catalog::get_rdn_by_oid(alias, path, key_alias, password, oid, occurrence_index)?;
        let mut accepted = password_categories();
        let _ = accepted.insert(ValidationCategory::MalformedOid);
        let envelope = checked(self.call(frame, tag).await?, &accepted)?;
        Ok(envelope.result().unwrap_or_default().to_string())
    }

    /// Signs plain data with the selected key, returning the signature as
    /// delivered by the middleware (base64 text).
    pub async fn sign_plain_data(
        &self,
        alias: &str,
        path: &str,
        key_alias: &str,
        password: &str,
        plaintext: &str,
    ) -> Result<String, CallError> {
        let (frame, tag) = catalog::sign_plain_data(alias, path, key_alias, password, plaintext)?;
        let mut accepted = password_categories();
        let _ = accepted.insert(ValidationCategory::UnsupportedKeyType);
        let envelope = checked(self.call(frame, tag).await?, &accepted)?;
        Ok(envelope.result().unwrap_or_default().to_string())
    }

    /// Verifies a signature over plain data, returning the middleware's
    /// verification report.
    pub async fn verify_plain_data(
        &self,
        alias: &str,
        path: &str,
        key_alias: &str,
        password: &str,
        plaintext: &str,
        signature: &str,
    ) -> Result<String, CallError> {
        let (frame, tag) =
            catalog::verify_plain_data(alias, path, key_alias, password, plaintext, signature)?;
        let mut accepted = password_categories();
        let _ = accepted.insert(ValidationCategory::UnsupportedKeyType);
        let envelope = checked(self.call(frame, tag).await?, &accepted)?;
        Ok(envelope.result().unwrap_or_default().to_string())
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    /// Shared happy path for the four certificate-field getters.
    async fn certificate_field(
        &self,
        frame: RequestFrame,
        tag: OperationTag,
    ) -> Result<String, CallError> {
        let envelope = checked(self.call(frame, tag).await?, &password_categories())?;
        Ok(envelope.result().unwrap_or_default().to_string())
    }

    /// Issues one operation and awaits its reply envelope.
    ///
    /// Enforces, in order: readiness, the single-outstanding-call
    /// invariant, and the call timeout.  On timeout the abandoned record
    /// is discarded so the correlator returns to idle; a reply that
    /// arrives later is treated as unsolicited and dropped.  The cleanup
    /// uses `abort_expired` rather than `abort`: between the timeout
    /// firing and the lock being reacquired, the late reply may already
    /// have cleared the record and a fresh call may be pending.
    async fn call(
        &self,
        frame: RequestFrame,
        tag: OperationTag,
    ) -> Result<ResponseEnvelope, CallError> {
        let state = self.state();
        if state != ConnectionState::Ready {
            return Err(CallError::NotReady(state));
        }

        let reply_rx = self.correlator.lock().await.issue(tag)?;

        if let Err(e) = self.channel.send_frame(frame.encode()).await {
            // The receiver must be gone before the cleanup so this call's
            // record reads as abandoned, not as a live successor's.
            drop(reply_rx);
            let _ = self.correlator.lock().await.abort_expired();
            return Err(CallError::Transport(e));
        }

        match timeout(self.config.call_timeout, reply_rx).await {
            Ok(Ok(envelope)) => Ok(envelope),
            // Sender dropped: the correlator aborted the pending call
            // because the connection went away.
            Ok(Err(_)) => Err(CallError::ConnectionLost),
            Err(_) => {
                let _ = self.correlator.lock().await.abort_expired();
                warn!(
                    "no reply for {tag} within {:?}; call abandoned",
                    self.config.call_timeout
                );
                Err(CallError::Timeout(self.config.call_timeout))
            }
        }
    }
}

impl Drop for SignerClient {
    fn drop(&mut self) {
        let handle = self
            .dispatch_abort
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

// ── Free helpers ──────────────────────────────────────────────────────────────

/// Runs until the frame channel closes, feeding parsed envelopes to the
/// correlator.  Malformed frames are logged and discarded here.
async fn run_dispatch_loop(mut frames: mpsc::Receiver<String>, correlator: Arc<Mutex<Correlator>>) {
    while let Some(raw) = frames.recv().await {
        match ResponseEnvelope::parse(&raw) {
            Ok(envelope) => {
                let _ = correlator.lock().await.dispatch(envelope);
            }
            Err(e) => warn!("discarding malformed frame: {e}"),
        }
    }
    // Transport gone; a caller still waiting must not hang on its oneshot.
    if let Some(tag) = correlator.lock().await.abort() {
        debug!("pending {tag} aborted: connection lost");
    }
}

/// The failure categories every password-guarded operation accepts.
fn password_categories() -> HashSet<ValidationCategory> {
    [
        ValidationCategory::WrongPassword,
        ValidationCategory::PasswordAttemptsExhausted,
    ]
    .into_iter()
    .collect()
}

/// Gates result access on the envelope's error code, classifying failures
/// against the operation's accepted categories.
fn checked(
    envelope: ResponseEnvelope,
    accepted: &HashSet<ValidationCategory>,
) -> Result<ResponseEnvelope, CallError> {
    if envelope.is_ok() {
        return Ok(envelope);
    }
    match envelope.classify_error(accepted) {
        Classification::Expected { category, message } => {
            Err(CallError::Validation { category, message })
        }
        Classification::Unexpected {
            error_code,
            message,
        } => Err(CallError::Middleware {
            error_code,
            message,
        }),
    }
}

/// Splits the newline-separated key listing into one entry per key.
fn split_key_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::transport::MockOutboundChannel;

    /// Builds a facade over a mock channel and a hand-fed frame stream.
    ///
    /// Returns the frame sender (the "middleware" side of the inbound
    /// stream), a receiver that fires after each `send_frame` call on the
    /// mock, the state publisher, and the client itself.
    fn harness(
        mut mock: MockOutboundChannel,
        expected_sends: usize,
        state: ConnectionState,
        call_timeout: Duration,
    ) -> (
        Arc<SignerClient>,
        mpsc::Sender<String>,
        mpsc::Receiver<()>,
        watch::Sender<ConnectionState>,
    ) {
        let (frame_tx, frame_rx) = mpsc::channel(8);
        let (sent_tx, sent_rx) = mpsc::channel(8);
        if expected_sends > 0 {
            mock.expect_send_frame()
                .times(expected_sends)
                .returning(move |_| {
                    let _ = sent_tx.try_send(());
                    Ok(())
                });
        }
        let (state_tx, state_rx) = watch::channel(state);
        let config = ClientConfig {
            call_timeout,
            ..ClientConfig::default()
        };
        let client = Arc::new(SignerClient::from_parts(
            Arc::new(mock),
            frame_rx,
            state_rx,
            config,
            None,
        ));
        (client, frame_tx, sent_rx, state_tx)
    }

    #[tokio::test]
    async fn test_set_locale_success_round_trip() {
        // Arrange
        let (client, frame_tx, mut sent_rx, _state) = harness(
            MockOutboundChannel::new(),
            1,
            ConnectionState::Ready,
            Duration::from_secs(1),
        );

        // Act: issue, then reply once the frame has actually been sent
        // (at that point the pending record is guaranteed to exist).
        let handle = tokio::spawn(async move { client.set_locale("ru").await });
        sent_rx.recv().await.expect("frame must be sent");
        frame_tx
            .send(r#"{"errorCode":0}"#.to_string())
            .await
            .unwrap();

        // Assert
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_get_keys_success_splits_listing() {
        let (client, frame_tx, mut sent_rx, _state) = harness(
            MockOutboundChannel::new(),
            1,
            ConnectionState::Ready,
            Duration::from_secs(1),
        );

        let handle = tokio::spawn(async move {
            client.get_keys("alias1", "/path/a.p12", "pw", "ALL").await
        });
        sent_rx.recv().await.unwrap();
        frame_tx
            .send(
                r#"{"result":"cn=Bob,serial=1\ncn=Carol,serial=2","errorCode":0}"#.to_string(),
            )
            .await
            .unwrap();

        let keys = handle.await.unwrap().expect("listing must parse");
        assert_eq!(keys, vec!["cn=Bob,serial=1", "cn=Carol,serial=2"]);
    }

    #[tokio::test]
    async fn test_get_keys_wrong_password_yields_validation_error() {
        let (client, frame_tx, mut sent_rx, _state) = harness(
            MockOutboundChannel::new(),
            1,
            ConnectionState::Ready,
            Duration::from_secs(1),
        );

        let handle = tokio::spawn(async move {
            client.get_keys("alias1", "/path/a.p12", "pw", "ALL").await
        });
        sent_rx.recv().await.unwrap();
        frame_tx
            .send(r#"{"result":null,"errorCode":3}"#.to_string())
            .await
            .unwrap();

        // get_keys accepts the password category, so code 3 surfaces as a
        // validation failure with the password-specific message.
        match handle.await.unwrap() {
            Err(CallError::Validation { category, message }) => {
                assert_eq!(category, ValidationCategory::WrongPassword);
                assert_eq!(message, "wrong password");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_browse_unknown_error_code_is_middleware_failure() {
        let (client, frame_tx, mut sent_rx, _state) = harness(
            MockOutboundChannel::new(),
            1,
            ConnectionState::Ready,
            Duration::from_secs(1),
        );

        let handle =
            tokio::spawn(async move { client.browse_key_store("PKCS12", "file", "").await });
        sent_rx.recv().await.unwrap();
        // browse accepts no validation categories; even a known password
        // code would be unexpected here — 99 is unknown everywhere.
        frame_tx
            .send(r#"{"errorCode":99}"#.to_string())
            .await
            .unwrap();

        assert!(matches!(
            handle.await.unwrap(),
            Err(CallError::Middleware { error_code: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_second_call_while_pending_is_rejected_without_send() {
        // Arrange: exactly one send expected — the mock fails the test if
        // the rejected second call reaches the wire.
        let (client, frame_tx, mut sent_rx, _state) = harness(
            MockOutboundChannel::new(),
            1,
            ConnectionState::Ready,
            Duration::from_secs(1),
        );

        // Act: first call goes out and waits.
        let first_client = Arc::clone(&client);
        let first = tokio::spawn(async move { first_client.set_locale("ru").await });
        sent_rx.recv().await.unwrap();

        // Second call back-to-back must fail fast.
        let second = client.get_subject_dn("a", "/p", "key1", "pw").await;
        assert!(matches!(second, Err(CallError::Misuse(_))));

        // The first call is unaffected and completes normally — exactly one
        // callback fires for exactly one reply.
        frame_tx
            .send(r#"{"errorCode":0}"#.to_string())
            .await
            .unwrap();
        assert!(first.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_call_without_reply_times_out_and_recovers() {
        // Arrange: two sends expected — the timed-out call and the retry.
        let (client, frame_tx, mut sent_rx, _state) = harness(
            MockOutboundChannel::new(),
            2,
            ConnectionState::Ready,
            Duration::from_millis(100),
        );

        // Act: no reply ever arrives for the first call.
        let result = client.set_locale("ru").await;
        assert!(matches!(result, Err(CallError::Timeout(_))));
        sent_rx.recv().await.unwrap();

        // The correlator must be idle again: a fresh call succeeds.
        let retry_client = Arc::clone(&client);
        let retry = tokio::spawn(async move { retry_client.set_locale("ru").await });
        sent_rx.recv().await.unwrap();
        frame_tx
            .send(r#"{"errorCode":0}"#.to_string())
            .await
            .unwrap();
        assert!(retry.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_send_failure_aborts_pending_and_recovers() {
        // Arrange: the first write fails at the socket; the harness arms
        // one further, successful send for the retry.
        let mut mock = MockOutboundChannel::new();
        mock.expect_send_frame().times(1).returning(|_| {
            Err(TransportError::Send(
                tokio_tungstenite::tungstenite::Error::ConnectionClosed,
            ))
        });
        let (client, frame_tx, mut sent_rx, _state) =
            harness(mock, 1, ConnectionState::Ready, Duration::from_secs(1));

        // Act / Assert: the failed call surfaces the transport error.
        let result = client.set_locale("ru").await;
        assert!(matches!(
            result,
            Err(CallError::Transport(TransportError::Send(_)))
        ));

        // The pending record was discarded: a retry goes straight through.
        let retry_client = Arc::clone(&client);
        let retry = tokio::spawn(async move { retry_client.set_locale("ru").await });
        sent_rx.recv().await.unwrap();
        frame_tx
            .send(r#"{"errorCode":0}"#.to_string())
            .await
            .unwrap();
        assert!(retry.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_connection_loss_while_pending_fails_the_call() {
        let (client, frame_tx, mut sent_rx, _state) = harness(
            MockOutboundChannel::new(),
            1,
            ConnectionState::Ready,
            Duration::from_secs(5),
        );

        let handle = tokio::spawn(async move { client.set_locale("ru").await });
        sent_rx.recv().await.unwrap();

        // Act: the transport side goes away — the frame channel closes and
        // the dispatch loop aborts the pending call.
        drop(frame_tx);

        assert!(matches!(
            handle.await.unwrap(),
            Err(CallError::ConnectionLost)
        ));
    }

    #[tokio::test]
    async fn test_call_rejected_when_not_ready() {
        // Arrange: no sends expected at all.
        let (client, _frame_tx, _sent_rx, _state) = harness(
            MockOutboundChannel::new(),
            0,
            ConnectionState::Disconnected,
            Duration::from_secs(1),
        );

        // Act / Assert
        let result = client.set_locale("ru").await;
        assert!(matches!(
            result,
            Err(CallError::NotReady(ConnectionState::Disconnected))
        ));
    }

    #[tokio::test]
    async fn test_missing_argument_rejected_before_send() {
        let (client, _frame_tx, _sent_rx, _state) = harness(
            MockOutboundChannel::new(),
            0,
            ConnectionState::Ready,
            Duration::from_secs(1),
        );

        let result = client.get_keys("alias1", "/path/a.p12", "", "ALL").await;
        assert!(matches!(result, Err(CallError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_malformed_frame_is_dropped_not_dispatched() {
        let (client, frame_tx, mut sent_rx, _state) = harness(
            MockOutboundChannel::new(),
            1,
            ConnectionState::Ready,
            Duration::from_secs(1),
        );

        let handle = tokio::spawn(async move { client.set_locale("ru").await });
        sent_rx.recv().await.unwrap();

        // A garbage frame must be discarded; the real reply still lands.
        frame_tx.send("this is not json".to_string()).await.unwrap();
        frame_tx
            .send(r#"{"errorCode":0}"#.to_string())
            .await
            .unwrap();

        assert!(handle.await.unwrap().is_ok());
    }

    #[test]
    fn test_split_key_listing_skips_blank_lines() {
        let listing = "cn=Bob,serial=1\n\ncn=Carol,serial=2\n";
        assert_eq!(
            split_key_listing(listing),
            vec!["cn=Bob,serial=1", "cn=Carol,serial=2"]
        );
    }

    #[test]
    fn test_split_key_listing_empty_input_is_empty_vec() {
        assert!(split_key_listing("").is_empty());
    }
}

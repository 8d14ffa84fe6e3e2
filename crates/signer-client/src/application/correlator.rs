//! Reply correlation for a protocol with no correlation identifiers.
//!
//! # Why this exists
//!
//! A middleware reply is a bare `{result, secondResult, errorCode}` object.
//! Nothing in it says which request it answers.  The only sound way to
//! attribute replies is to allow a single outstanding call and remember its
//! tag; that memory, and the invariant protecting it, live here.
//!
//! # State machine
//!
//! ```text
//!          issue(tag) ──────────────►
//!   Idle                               Awaiting(tag)
//!          ◄────────── dispatch(env)
//!          ◄────────── abort()          (connection drop / timeout)
//! ```
//!
//! - `issue` while `Awaiting` fails fast with [`ProtocolMisuseError`]:
//!   nothing is sent, and the earlier pending call is untouched.  Silently
//!   overwriting the pending record would strand the first caller and
//!   misattribute the next reply.
//! - `dispatch` while `Idle` drops the frame: there is no pending callback
//!   to route it to, so it is logged and discarded.
//!
//! At most one [`PendingCall`] exists at any instant.  The pending record
//! holds a `oneshot::Sender`; the issuing caller awaits the paired
//! receiver, which is this design's form of the per-tag callback.

use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use signer_protocol::{OperationTag, ResponseEnvelope};

/// A second operation was issued while one was still awaiting its reply.
///
/// This is a caller-contract violation, detected locally before any frame
/// is sent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("operation {attempted} issued while {pending} is still awaiting its reply")]
pub struct ProtocolMisuseError {
    /// The operation currently awaiting its reply.
    pub pending: OperationTag,
    /// The operation the caller tried to issue on top of it.
    pub attempted: OperationTag,
}

/// The single in-flight call: its tag and the channel back to its caller.
struct PendingCall {
    tag: OperationTag,
    reply: oneshot::Sender<ResponseEnvelope>,
}

/// Routes each inbound envelope to the one pending operation.
///
/// `pending == None` is the `Idle` state; `Some` is `Awaiting(tag)`.
pub struct Correlator {
    pending: Option<PendingCall>,
}

impl Correlator {
    /// Creates an idle correlator.
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Records `tag` as the outstanding operation.
    ///
    /// Returns the receiver on which the reply envelope will be delivered.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolMisuseError`] if another operation is already
    /// pending; the new call must not be sent.
    pub fn issue(
        &mut self,
        tag: OperationTag,
    ) -> Result<oneshot::Receiver<ResponseEnvelope>, ProtocolMisuseError> {
        if let Some(pending) = &self.pending {
            return Err(ProtocolMisuseError {
                pending: pending.tag,
                attempted: tag,
            });
        }
        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending = Some(PendingCall {
            tag,
            reply: reply_tx,
        });
        debug!("awaiting reply for {tag}");
        Ok(reply_rx)
    }

    /// Delivers an inbound envelope to the pending call, returning its tag.
    ///
    /// The pending record is cleared regardless of whether the envelope
    /// carried success or failure — the reply, whatever it says, completes
    /// the call.  Returns `None` if the frame could not be attributed:
    /// either no call is pending (the frame is logged and dropped) or the
    /// caller stopped waiting (its timeout fired first).
    pub fn dispatch(&mut self, envelope: ResponseEnvelope) -> Option<OperationTag> {
        match self.pending.take() {
            Some(PendingCall { tag, reply }) => {
                if reply.send(envelope).is_err() {
                    debug!("reply receiver for {tag} already gone; envelope dropped");
                    return None;
                }
                debug!("dispatched reply for {tag}");
                Some(tag)
            }
            None => {
                warn!("frame received while no call is pending; dropped");
                None
            }
        }
    }

    /// Discards the pending call without invoking it.
    ///
    /// Used when the connection drops or a call times out.  The waiting
    /// caller observes the dropped channel, never a reply.
    pub fn abort(&mut self) -> Option<OperationTag> {
        let tag = self.pending.take().map(|p| p.tag);
        if let Some(tag) = tag {
            debug!("pending call for {tag} aborted");
        }
        tag
    }

    /// Discards the pending call only if its caller has stopped waiting.
    ///
    /// Cleanup path for a call that timed out or failed to send.  By the
    /// time that caller reacquires the correlator, the dispatch loop may
    /// already have consumed its stale record and another task may have
    /// issued a fresh call; a live receiver marks that successor, which
    /// must stay pending.  [`abort`](Correlator::abort) remains the
    /// unconditional form for connection teardown.
    pub fn abort_expired(&mut self) -> Option<OperationTag> {
        match &self.pending {
            Some(pending) if pending.reply.is_closed() => self.abort(),
            _ => None,
        }
    }

    /// Returns the tag of the operation awaiting its reply, if any.
    pub fn pending_tag(&self) -> Option<OperationTag> {
        self.pending.as_ref().map(|p| p.tag)
    }

    /// True when no call is in flight.
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}

impl Default for Correlator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

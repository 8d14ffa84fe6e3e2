//! The response envelope: parsed form of one inbound middleware frame.
//!
//! Every structured reply from the middleware is a JSON object with up to
//! three fields:
//!
//! ```json
//! {"result":"cn=Bob,serial=1","secondResult":null,"errorCode":0}
//! ```
//!
//! `errorCode` absent or `0` means success.  `result` carries the primary
//! value (key listing, DN string, signature, …); `secondResult` carries an
//! optional secondary value for operations that return a pair.
//!
//! Envelopes are ephemeral: one is constructed per inbound frame, consumed
//! by the single waiting caller, and discarded.  Nothing here is retained
//! across frames or connections.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{classify, Classification, ValidationCategory};

/// The error code value that means "operation succeeded".
pub const SUCCESS_CODE: i64 = 0;

/// Errors that can occur while parsing an inbound frame.
#[derive(Debug, Error, PartialEq)]
pub enum EnvelopeError {
    /// The payload is not a valid envelope object.
    ///
    /// The frame must be logged and discarded, never dispatched to a
    /// waiting caller.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
}

/// Parsed form of one inbound middleware reply.
///
/// Field names mirror the wire protocol exactly; all three fields are
/// optional on the wire, so each is an `Option` here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Primary result value.  Only meaningful when [`is_ok`] is true;
    /// error replies may carry `null` or stale text here.
    ///
    /// [`is_ok`]: ResponseEnvelope::is_ok
    #[serde(default)]
    pub result: Option<String>,

    /// Optional secondary result value.
    #[serde(rename = "secondResult", default)]
    pub second_result: Option<String>,

    /// Middleware error code.  Absent or [`SUCCESS_CODE`] means success.
    #[serde(rename = "errorCode", default)]
    pub error_code: Option<i64>,
}

impl ResponseEnvelope {
    /// Parses a raw text frame into an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::MalformedFrame`] if the payload is not a
    /// JSON object of the expected shape.  The heartbeat sentinel never
    /// reaches this function — the transport filters it first — but if it
    /// did, it would fail here like any other non-JSON text.
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        serde_json::from_str(raw).map_err(|e| EnvelopeError::MalformedFrame(e.to_string()))
    }

    /// Returns true iff the middleware reported success.
    pub fn is_ok(&self) -> bool {
        match self.error_code {
            None => true,
            Some(code) => code == SUCCESS_CODE,
        }
    }

    /// Returns the primary result value.
    ///
    /// Only valid when [`is_ok`](ResponseEnvelope::is_ok) returns true;
    /// callers must check the error code first.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Returns the secondary result value, if the operation produced one.
    pub fn second_result(&self) -> Option<&str> {
        self.second_result.as_deref()
    }

    /// Classifies this envelope's error code against the set of validation
    /// categories the caller declared acceptable for the current operation.
    ///
    /// Only meaningful when `is_ok()` is false; a success envelope has
    /// nothing to classify.
    pub fn classify_error(&self, accepted: &HashSet<ValidationCategory>) -> Classification {
        debug_assert!(!self.is_ok(), "classify_error called on a success envelope");
        classify(self.error_code.unwrap_or(SUCCESS_CODE), accepted)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Outbound request frames and the operation tag enumeration.
//!
//! # Wire shape
//!
//! Every request to the middleware is a single WebSocket text frame carrying
//! a JSON object with a method name and a positional argument list:
//!
//! ```json
//! {"method":"getKeys","args":["alias1","/path/a.p12","pw","ALL"]}
//! ```
//!
//! Arguments are strings with one exception: `getRdnByOid` carries an
//! integer occurrence index as its final argument, so `args` is modelled as
//! a list of JSON values rather than a list of strings.
//!
//! # Why an [`OperationTag`] exists
//!
//! The reply to a request is a bare `{result, secondResult, errorCode}`
//! object with no field naming the operation it answers.  The only way to
//! attribute a reply is to remember which operation was issued last.  The
//! tag is that memory: each catalog builder returns one alongside its frame,
//! and the client's correlator holds at most one tag at a time.

use serde::Serialize;
use serde_json::Value;

/// The keep-alive sentinel the middleware injects into the frame stream.
///
/// This is plain text, not JSON.  It must be recognised by exact string
/// match and dropped *before* envelope parsing is attempted; the transport
/// layer is responsible for filtering it.
pub const HEARTBEAT_SENTINEL: &str = "--heartbeat--";

/// Identifies which remote operation a request frame (and therefore the next
/// reply) belongs to.
///
/// One variant per supported middleware method.  "No call in flight" is
/// represented by the client's correlator holding no tag at all
/// (`Option<OperationTag>::None`), not by a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationTag {
    /// Browse a key-store directory listing.
    BrowseKeyStore,
    /// Enumerate keys in a key store.
    GetKeys,
    /// Switch the middleware's message locale.
    SetLocale,
    /// Read the certificate validity start date.
    GetNotBefore,
    /// Read the certificate validity end date.
    GetNotAfter,
    /// Read the certificate subject distinguished name.
    GetSubjectDn,
    /// Read the certificate issuer distinguished name.
    GetIssuerDn,
    /// Look up one RDN component of the subject DN by OID.
    GetRdnByOid,
    /// Produce a signature over plain data.
    SignPlainData,
    /// Verify a signature over plain data.
    VerifyPlainData,
}

impl OperationTag {
    /// Returns the wire method name for this operation.
    pub fn method(self) -> &'static str {
        match self {
            OperationTag::BrowseKeyStore => "browseKeyStore",
            OperationTag::GetKeys => "getKeys",
            OperationTag::SetLocale => "setLocale",
            OperationTag::GetNotBefore => "getNotBefore",
            OperationTag::GetNotAfter => "getNotAfter",
            OperationTag::GetSubjectDn => "getSubjectDN",
            OperationTag::GetIssuerDn => "getIssuerDN",
            OperationTag::GetRdnByOid => "getRdnByOid",
            OperationTag::SignPlainData => "signPlainData",
            OperationTag::VerifyPlainData => "verifyPlainData",
        }
    }
}

impl std::fmt::Display for OperationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method())
    }
}

/// One outbound request: a method name plus its ordered argument list.
///
/// Constructed fresh per call by the operation catalog and not retained
/// after sending.  Serialises to the exact wire shape shown in the module
/// docs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestFrame {
    /// Middleware method name (e.g. `"getKeys"`).
    pub method: &'static str,
    /// Positional arguments in the order the middleware expects.
    pub args: Vec<Value>,
}

impl RequestFrame {
    /// Encodes the frame as the JSON text payload to send over the socket.
    pub fn encode(&self) -> String {
        // `Value::to_string` cannot fail; building through `json!` avoids a
        // fallible `serde_json::to_string` on the struct itself.
        serde_json::json!({ "method": self.method, "args": self.args }).to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

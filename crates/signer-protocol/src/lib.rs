//! # signer-protocol
//!
//! Shared protocol library for the PKI signer client: the JSON wire types
//! exchanged with the local signing middleware, the catalog of remote
//! operations, and the classification of middleware error codes.
//!
//! This crate has no I/O and no OS dependencies.  It defines:
//!
//! - **`protocol`** – What travels over the WebSocket.  Outbound frames are
//!   `{"method": ..., "args": [...]}` objects built by the operation catalog;
//!   inbound frames are `{result, secondResult, errorCode}` envelopes.  The
//!   protocol carries *no* correlation identifier, which is why the client
//!   layer above this crate allows only one outstanding call at a time.
//!
//! - **`errors`** – The fixed table mapping middleware error codes to named
//!   validation categories (wrong password, attempts exhausted, …) and the
//!   two-tier classification that separates failures a call site expects
//!   from ones it does not.

pub mod errors;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `signer_protocol::ResponseEnvelope` instead of the full module path.
pub use errors::{classify, Classification, ValidationCategory};
pub use protocol::catalog::CatalogError;
pub use protocol::envelope::{EnvelopeError, ResponseEnvelope, SUCCESS_CODE};
pub use protocol::frame::{OperationTag, RequestFrame, HEARTBEAT_SENTINEL};

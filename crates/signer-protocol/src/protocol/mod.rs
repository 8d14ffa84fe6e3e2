//! Protocol module containing the wire frame types, the response envelope,
//! and the operation catalog.

pub mod catalog;
pub mod envelope;
pub mod frame;

pub use catalog::CatalogError;
pub use envelope::{EnvelopeError, ResponseEnvelope};
pub use frame::{OperationTag, RequestFrame, HEARTBEAT_SENTINEL};

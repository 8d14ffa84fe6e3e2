//! Infrastructure layer: the WebSocket transport to the middleware.

pub mod transport;

pub use transport::{ConnectionState, OutboundChannel, Transport, TransportError};

//! # signer-client
//!
//! Client facade for a local cryptographic-signing middleware process.
//!
//! The middleware exposes its operations (key-store browsing, key
//! enumeration, certificate field extraction, plain-data signing and
//! verification) over a single persistent WebSocket on the loopback
//! interface.  The wire protocol has a hard constraint this crate is built
//! around: replies carry **no correlation identifier**, so only one call
//! may be outstanding at any instant.
//!
//! Layer layout follows the usual split:
//!
//! - **`domain`** – configuration; plain data, no I/O.
//! - **`application`** – the [`Correlator`] state machine that pairs each
//!   reply with the one pending operation, and the [`SignerClient`] facade
//!   exposing one async method per remote operation.
//! - **`infrastructure`** – the [`Transport`] that owns the WebSocket,
//!   publishes readiness transitions, and filters the middleware's
//!   keep-alive sentinel out of the frame stream.
//!
//! [`Correlator`]: application::correlator::Correlator
//! [`SignerClient`]: application::client::SignerClient
//! [`Transport`]: infrastructure::transport::Transport

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::client::{CallError, SignerClient};
pub use application::correlator::{Correlator, ProtocolMisuseError};
pub use domain::config::ClientConfig;
pub use infrastructure::transport::{ConnectionState, Transport, TransportError};

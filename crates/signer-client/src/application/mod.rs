//! Application layer: reply correlation and the per-operation facade.
//!
//! - **`correlator`** – The state machine that remembers which operation is
//!   awaiting its reply and routes each inbound envelope to it.  This is
//!   where the protocol's single-outstanding-call invariant lives.
//!
//! - **`client`** – [`SignerClient`](client::SignerClient), the facade the
//!   rest of the program talks to: one async method per remote operation,
//!   with argument validation, timeout, and error classification built in.

pub mod client;
pub mod correlator;

//! Client configuration types.
//!
//! [`ClientConfig`] is the single source of truth for all runtime settings.
//! It can be constructed from CLI arguments (see `main.rs`) or from
//! defaults suitable for a middleware running on its standard local port.
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads inside the domain) makes the client easy to embed in
//! tests; the integration tests point `endpoint_url` at an in-process fake
//! middleware.

use std::time::Duration;

/// All runtime configuration for the signer client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket URL of the middleware process.
    ///
    /// The middleware listens on a fixed loopback address with a
    /// TLS-secured socket, hence the `wss://` default.  Trust for the
    /// middleware's certificate is host configuration and outside this
    /// client's responsibility.
    pub endpoint_url: String,

    /// Maximum time to wait for the socket-open handshake.
    pub connect_timeout: Duration,

    /// Maximum time to wait for the reply to one issued operation.
    ///
    /// The protocol has no way to cancel a call on the middleware side; on
    /// expiry the client abandons the pending call locally and surfaces a
    /// timeout to the caller.
    pub call_timeout: Duration,
}

impl Default for ClientConfig {
    /// Returns a `ClientConfig` for a middleware on its standard port.
    ///
    /// | Field           | Default                  |
    /// |-----------------|--------------------------|
    /// | endpoint_url    | `wss://127.0.0.1:13579/` |
    /// | connect_timeout | 10 seconds               |
    /// | call_timeout    | 30 seconds               |
    fn default() -> Self {
        Self {
            endpoint_url: "wss://127.0.0.1:13579/".to_string(),
            connect_timeout: Duration::from_secs(10),
            call_timeout: Duration::from_secs(30),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Domain layer: client configuration.

pub mod config;

pub use config::ClientConfig;

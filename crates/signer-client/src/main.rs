//! PKI signer client — command-line entry point.
//!
//! `signer-cli` drives the local signing middleware from the command line:
//! it opens the persistent WebSocket connection, issues exactly one
//! operation, prints the result, and closes the connection.
//!
//! # Usage
//!
//! ```text
//! signer-cli [OPTIONS] <COMMAND>
//!
//! Commands:
//!   browse      List the contents of a key store
//!   keys        Enumerate keys in a key store
//!   locale      Switch the middleware's message language
//!   cert-field  Read one certificate field (dates, subject/issuer DN)
//!   rdn         Look up an RDN component of the subject DN by OID
//!   sign        Sign plain data with the selected key
//!   verify      Verify a signature over plain data
//!
//! Options:
//!   --endpoint <URL>          Middleware WebSocket URL [default: wss://127.0.0.1:13579/]
//!   --connect-timeout <SECS>  Socket-open timeout [default: 10]
//!   --call-timeout <SECS>     Per-operation reply timeout [default: 30]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                 | Default                  |
//! |--------------------------|--------------------------|
//! | `SIGNER_ENDPOINT`        | `wss://127.0.0.1:13579/` |
//! | `SIGNER_CONNECT_TIMEOUT` | `10`                     |
//! | `SIGNER_CALL_TIMEOUT`    | `30`                     |
//!
//! Log output is controlled by `RUST_LOG` (e.g. `RUST_LOG=debug` to see
//! frame traffic and heartbeat filtering).

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use signer_client::{ClientConfig, SignerClient};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Command-line client for the local PKI signing middleware.
#[derive(Debug, Parser)]
#[command(
    name = "signer-cli",
    about = "Drive the local PKI signing middleware over its WebSocket protocol",
    version
)]
struct Cli {
    /// WebSocket URL of the middleware process.
    #[arg(
        long,
        default_value = "wss://127.0.0.1:13579/",
        env = "SIGNER_ENDPOINT"
    )]
    endpoint: String,

    /// Socket-open timeout in seconds.
    #[arg(long, default_value_t = 10, env = "SIGNER_CONNECT_TIMEOUT")]
    connect_timeout: u64,

    /// Per-operation reply timeout in seconds.
    #[arg(long, default_value_t = 30, env = "SIGNER_CALL_TIMEOUT")]
    call_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

/// Which certificate field `cert-field` should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CertField {
    /// Validity start date.
    NotBefore,
    /// Validity end date.
    NotAfter,
    /// Subject distinguished name.
    SubjectDn,
    /// Issuer distinguished name.
    IssuerDn,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the contents of a key store.
    Browse {
        /// Key-store alias.
        alias: String,
        /// Store type (e.g. `file`).
        store_type: String,
        /// Directory to list; omit to list from the storage root.
        #[arg(long, default_value = "")]
        path: String,
    },
    /// Enumerate keys in a key store.
    Keys {
        /// Key-store alias.
        alias: String,
        /// Storage path (e.g. `/path/store.p12`).
        path: String,
        /// Key-store password.
        password: String,
        /// Key type filter; `ALL` for an unfiltered listing.
        #[arg(long, default_value = "ALL")]
        filter: String,
    },
    /// Switch the middleware's message language.
    Locale {
        /// Language code (e.g. `en`, `ru`, `kk`).
        language: String,
    },
    /// Read one certificate field.
    CertField {
        /// Which field to read.
        #[arg(value_enum)]
        field: CertField,
        /// Key-store alias.
        alias: String,
        /// Storage path.
        path: String,
        /// Key alias inside the store.
        key_alias: String,
        /// Key-store password.
        password: String,
    },
    /// Look up an RDN component of the subject DN by OID.
    Rdn {
        /// Key-store alias.
        alias: String,
        /// Storage path.
        path: String,
        /// Key alias inside the store.
        key_alias: String,
        /// Key-store password.
        password: String,
        /// Object identifier (e.g. `2.5.4.3` for the common name).
        oid: String,
        /// 0-based occurrence index when the OID appears more than once.
        #[arg(long, default_value_t = 0)]
        index: u32,
    },
    /// Sign plain data with the selected key.
    Sign {
        /// Key-store alias.
        alias: String,
        /// Storage path.
        path: String,
        /// Key alias inside the store.
        key_alias: String,
        /// Key-store password.
        password: String,
        /// The data to sign.
        plaintext: String,
    },
    /// Verify a signature over plain data.
    Verify {
        /// Key-store alias.
        alias: String,
        /// Storage path.
        path: String,
        /// Key alias inside the store.
        key_alias: String,
        /// Key-store password.
        password: String,
        /// The signed data.
        plaintext: String,
        /// The signature to verify (base64 text).
        signature: String,
    },
}

impl Cli {
    /// Converts the connection-related arguments into a [`ClientConfig`].
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint_url: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout),
            call_timeout: Duration::from_secs(self.call_timeout),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.client_config();

    let client = SignerClient::connect(config)
        .await
        .with_context(|| format!("could not reach the signing middleware at {}", cli.endpoint))?;

    let outcome = run_command(&client, &cli.command).await;

    // Tear the connection down on every exit path before reporting.
    client.close().await;

    let output = outcome?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Dispatches one CLI subcommand to the matching facade operation.
async fn run_command(client: &SignerClient, command: &Command) -> anyhow::Result<String> {
    match command {
        Command::Browse {
            alias,
            store_type,
            path,
        } => Ok(client.browse_key_store(alias, store_type, path).await?),
        Command::Keys {
            alias,
            path,
            password,
            filter,
        } => {
            let keys = client.get_keys(alias, path, password, filter).await?;
            Ok(keys.join("\n"))
        }
        Command::Locale { language } => {
            client.set_locale(language).await?;
            Ok(String::new())
        }
        Command::CertField {
            field,
            alias,
            path,
            key_alias,
            password,
        } => {
            let value = match field {
                CertField::NotBefore => {
                    client.get_not_before(alias, path, key_alias, password).await?
                }
                CertField::NotAfter => {
                    client.get_not_after(alias, path, key_alias, password).await?
                }
                CertField::SubjectDn => {
                    client.get_subject_dn(alias, path, key_alias, password).await?
                }
                CertField::IssuerDn => {
                    client.get_issuer_dn(alias, path, key_alias, password).await?
                }
            };
            Ok(value)
        }
        Command::Rdn {
            alias,
            path,
            key_alias,
            password,
            oid,
            index,
        } => Ok(client
            .get_rdn_by_oid(alias, path, key_alias, password, oid, *index)
            .await?),
        Command::Sign {
            alias,
            path,
            key_alias,
            password,
            plaintext,
        } => Ok(client
            .sign_plain_data(alias, path, key_alias, password, plaintext)
            .await?),
        Command::Verify {
            alias,
            path,
            key_alias,
            password,
            plaintext,
            signature,
        } => Ok(client
            .verify_plain_data(alias, path, key_alias, password, plaintext, signature)
            .await?),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

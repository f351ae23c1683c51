//! Wallet connector contract.
//!
//! Every wallet backend (injected extension, wallet-app browser, remote
//! pairing) is reached through [`WalletConnector`], so the orchestrator and
//! the UI never touch the ambient `window.ethereum` object directly. Tests
//! substitute fake connectors behind the same trait.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed future for dyn-compatible async trait methods. Futures in this
/// crate run on the browser's single thread and are `!Send` by design.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// How a connector reaches the wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    /// Provider object injected into the page by an extension or a
    /// wallet-embedded browser.
    Injected,
    /// A specific wallet application's own connector.
    AppSpecific,
    /// Out-of-band pairing handshake (QR code or deep link).
    RemotePairing,
}

/// Capability metadata for one enumerated connector.
///
/// Descriptors are immutable snapshots: availability is probed at
/// enumeration time and only changes on an explicit registry refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorDescriptor {
    pub id: String,
    pub display_name: String,
    pub kind: ConnectorKind,
    pub is_available: bool,
}

/// Normalized wallet failure taxonomy. Raw provider errors are classified
/// into these at the orchestrator/interop boundary and never propagate as
/// uncaught exceptions into the UI layer.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WalletError {
    /// No connector of the requested kind exists in this environment.
    /// Informational, not retryable; the UI points at an alternative.
    #[error("no wallet provider available for connector `{0}`")]
    NoProviderAvailable(String),

    /// The human declined the wallet prompt. Retryable.
    #[error("connection request was rejected in the wallet")]
    UserRejected,

    /// Provider granted a session but returned no accounts. Soft failure:
    /// the session lands in `Disconnected`, not `Error`.
    #[error("the wallet granted a session with no accounts")]
    EmptyAccountSet,

    /// The provider threw or sent a malformed payload. Retryable; the raw
    /// message is surfaced where feasible.
    #[error("wallet provider fault: {0}")]
    ProviderFault(String),

    /// The wallet is on a chain other than the single configured one.
    /// Equivalent to disconnection.
    #[error("unsupported chain `{0}`; this app is pinned to one network")]
    UnsupportedChain(String),

    /// Local precondition: a connection attempt is already in progress.
    #[error("a connection attempt is already in progress")]
    AttemptInProgress,

    /// Local precondition: connect() is only allowed from Disconnected or
    /// Error.
    #[error("a wallet is already connected")]
    AlreadyConnected,
}

/// A backend adapter capable of establishing a wallet session.
pub trait WalletConnector {
    /// Capability snapshot for this connector.
    fn descriptor(&self) -> ConnectorDescriptor;

    /// Request accounts from the wallet. May prompt the user and may
    /// suspend for unbounded real time.
    fn request_accounts(&self) -> LocalBoxFuture<'_, Result<Vec<String>, WalletError>>;

    /// Query already-authorized accounts without triggering any prompt.
    fn authorized_accounts(&self) -> LocalBoxFuture<'_, Result<Vec<String>, WalletError>>;
}

impl WalletError {
    /// Whether re-invoking `connect()` makes sense for this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WalletError::UserRejected | WalletError::ProviderFault(_))
    }
}

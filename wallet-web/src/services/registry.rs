//! Provider registry.
//!
//! Enumerates the wallet-connector backends available in this environment.
//! Probing is idempotent and side-effect-free: listing connectors never
//! initiates a connection, and a failed probe yields `is_available: false`
//! rather than omitting the entry, so the UI can explain unavailability.

use std::rc::Rc;

use super::connector::{ConnectorDescriptor, ConnectorKind, WalletConnector};
use super::injected::InjectedConnector;
use super::pairing::RemotePairingConnector;
use crate::utils::constants::PAIRING_PROJECT_ID;

/// Builds the connector set for the current environment. Swappable so tests
/// can register fake connectors.
pub type ConnectorProbe = Box<dyn Fn() -> Vec<Rc<dyn WalletConnector>>>;

/// The browser probe: every known backend, probed in place. Unavailable
/// backends stay in the list so the UI can name why they cannot be used.
pub fn environment_probe() -> Vec<Rc<dyn WalletConnector>> {
    vec![
        Rc::new(InjectedConnector::probe_browser()),
        Rc::new(InjectedConnector::probe_metamask()),
        Rc::new(RemotePairingConnector::probe(PAIRING_PROJECT_ID)),
    ]
}

pub struct ProviderRegistry {
    probe: ConnectorProbe,
    connectors: Vec<Rc<dyn WalletConnector>>,
}

impl ProviderRegistry {
    /// Build a registry from a probe function and run the initial probe.
    pub fn new(probe: ConnectorProbe) -> Self {
        let connectors = probe();
        Self { probe, connectors }
    }

    /// Registry over a fixed connector set (tests).
    pub fn with_connectors(connectors: Vec<Rc<dyn WalletConnector>>) -> Self {
        Self {
            probe: Box::new(Vec::new),
            connectors,
        }
    }

    /// Descriptor snapshots for every known backend, available or not.
    pub fn list_connectors(&self) -> Vec<ConnectorDescriptor> {
        self.connectors.iter().map(|c| c.descriptor()).collect()
    }

    /// Look up a connector by id. Availability is the caller's concern;
    /// unavailable connectors are still returned so callers can surface a
    /// precise error.
    pub fn connector(&self, id: &str) -> Option<Rc<dyn WalletConnector>> {
        self.connectors
            .iter()
            .find(|c| c.descriptor().id == id)
            .cloned()
    }

    /// Connectors whose last probe reported them available, in enumeration
    /// order. Used by the silent session probe.
    pub fn available_connectors(&self) -> Vec<Rc<dyn WalletConnector>> {
        self.connectors
            .iter()
            .filter(|c| c.descriptor().is_available)
            .cloned()
            .collect()
    }

    /// Whether any available connector of the given kind exists.
    pub fn has_available(&self, kind: ConnectorKind) -> bool {
        self.connectors.iter().any(|c| {
            let d = c.descriptor();
            d.kind == kind && d.is_available
        })
    }

    /// Re-probe the environment, e.g. after an extension was installed
    /// mid-session or after a chain-mismatch session reset.
    pub fn refresh(&mut self) {
        let probed = (self.probe)();
        // A fixed-set registry keeps its connectors across refreshes.
        if !probed.is_empty() || self.connectors.is_empty() {
            self.connectors = probed;
        }
    }
}

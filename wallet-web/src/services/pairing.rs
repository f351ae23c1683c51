//! Remote-pairing connector.
//!
//! Hands the session off to a wallet app via a pairing deep link. The
//! handshake completes out of band: navigating away is the whole request,
//! so `request_accounts` resolves with an empty set and the returning page
//! load picks the session up through the silent probe.

use wasm_bindgen::JsValue;

use super::connector::{
    ConnectorDescriptor, ConnectorKind, LocalBoxFuture, WalletConnector, WalletError,
};
use crate::utils::constants::CHAIN_ID;

pub const PAIRING_CONNECTOR_ID: &str = "pairing";

/// Build the deep link that opens the pairing flow in the wallet app, with
/// a return URL back to the current page.
pub fn pairing_deep_link(project_id: &str, return_href: &str) -> String {
    format!(
        "https://pair.walletlink.example/connect?projectId={}&chainId={}&returnUrl={}",
        urlencoding::encode(project_id),
        CHAIN_ID,
        urlencoding::encode(return_href),
    )
}

pub struct RemotePairingConnector {
    descriptor: ConnectorDescriptor,
    project_id: Option<String>,
}

impl RemotePairingConnector {
    /// Available only when a pairing project id was configured at build
    /// time. Probing never opens the pairing flow.
    pub fn probe(project_id: Option<&str>) -> Self {
        Self {
            descriptor: ConnectorDescriptor {
                id: PAIRING_CONNECTOR_ID.to_string(),
                display_name: "Wallet App Pairing".to_string(),
                kind: ConnectorKind::RemotePairing,
                is_available: project_id.is_some(),
            },
            project_id: project_id.map(str::to_string),
        }
    }

    fn navigate_to_pairing(&self) -> Result<(), WalletError> {
        let project_id = self
            .project_id
            .as_deref()
            .ok_or_else(|| WalletError::NoProviderAvailable(PAIRING_CONNECTOR_ID.to_string()))?;

        let window = web_sys::window()
            .ok_or_else(|| WalletError::ProviderFault("no window object".to_string()))?;
        let href = window
            .location()
            .href()
            .map_err(|e: JsValue| WalletError::ProviderFault(format!("{e:?}")))?;

        let link = pairing_deep_link(project_id, &href);
        log::info!("opening pairing deep link");
        window
            .location()
            .set_href(&link)
            .map_err(|e: JsValue| WalletError::ProviderFault(format!("{e:?}")))
    }
}

impl WalletConnector for RemotePairingConnector {
    fn descriptor(&self) -> ConnectorDescriptor {
        self.descriptor.clone()
    }

    fn request_accounts(&self) -> LocalBoxFuture<'_, Result<Vec<String>, WalletError>> {
        Box::pin(async move {
            self.navigate_to_pairing()?;
            // The handshake finishes in the wallet app; no accounts yet.
            Ok(Vec::new())
        })
    }

    fn authorized_accounts(&self) -> LocalBoxFuture<'_, Result<Vec<String>, WalletError>> {
        // Pairing sessions are adopted by the injected connector after the
        // wallet app returns; there is nothing to probe silently here.
        Box::pin(async { Ok(Vec::new()) })
    }
}

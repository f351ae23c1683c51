//! Injected provider interop via wasm-bindgen.
//!
//! Bridges the EIP-1193 provider object (`window.ethereum`) into the
//! connector and orchestrator layers. Two connector flavors share the same
//! provider object: the plain injected extension and the MetaMask-flagged
//! variant exposed inside the wallet's embedded browser. Raw provider
//! errors are classified into [`WalletError`] here so nothing upstream sees
//! a JS exception.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::connector::{
    ConnectorDescriptor, ConnectorKind, LocalBoxFuture, WalletConnector, WalletError,
};
use super::orchestrator::ConnectionOrchestrator;

pub const INJECTED_CONNECTOR_ID: &str = "injected";
pub const METAMASK_CONNECTOR_ID: &str = "metamask";

#[wasm_bindgen(inline_js = "
export function hasInjectedProvider() {
    return typeof window.ethereum !== 'undefined' && window.ethereum !== null;
}

export function isMetaMaskProvider() {
    return hasInjectedProvider() && window.ethereum.isMetaMask === true;
}

export async function injectedRequestAccounts() {
    if (!hasInjectedProvider()) {
        throw new Error('no injected provider');
    }
    return await window.ethereum.request({ method: 'eth_requestAccounts' });
}

export async function injectedAuthorizedAccounts() {
    if (!hasInjectedProvider()) {
        throw new Error('no injected provider');
    }
    // eth_accounts never prompts; it only reports prior authorization.
    return await window.ethereum.request({ method: 'eth_accounts' });
}

const providerHandlers = {};

export function subscribeInjectedEvents(onAccounts, onChain) {
    if (!hasInjectedProvider() || typeof window.ethereum.on !== 'function') {
        return false;
    }
    unsubscribeInjectedEvents();
    providerHandlers.accounts = (accounts) => onAccounts(accounts);
    providerHandlers.chain = (chainId) => onChain(chainId);
    window.ethereum.on('accountsChanged', providerHandlers.accounts);
    window.ethereum.on('chainChanged', providerHandlers.chain);
    return true;
}

export function unsubscribeInjectedEvents() {
    if (!hasInjectedProvider() || typeof window.ethereum.removeListener !== 'function') {
        return;
    }
    if (providerHandlers.accounts) {
        window.ethereum.removeListener('accountsChanged', providerHandlers.accounts);
        delete providerHandlers.accounts;
    }
    if (providerHandlers.chain) {
        window.ethereum.removeListener('chainChanged', providerHandlers.chain);
        delete providerHandlers.chain;
    }
}
")]
extern "C" {
    pub fn hasInjectedProvider() -> bool;

    pub fn isMetaMaskProvider() -> bool;

    #[wasm_bindgen(catch)]
    pub async fn injectedRequestAccounts() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn injectedAuthorizedAccounts() -> Result<JsValue, JsValue>;

    fn subscribeInjectedEvents(
        on_accounts: &Closure<dyn Fn(JsValue)>,
        on_chain: &Closure<dyn Fn(JsValue)>,
    ) -> bool;

    fn unsubscribeInjectedEvents();
}

/// Connector over the injected EIP-1193 provider.
pub struct InjectedConnector {
    descriptor: ConnectorDescriptor,
}

impl InjectedConnector {
    /// The plain injected-extension connector, available whenever a provider
    /// object exists in the page.
    pub fn probe_browser() -> Self {
        Self {
            descriptor: ConnectorDescriptor {
                id: INJECTED_CONNECTOR_ID.to_string(),
                display_name: "Browser Wallet".to_string(),
                kind: ConnectorKind::Injected,
                is_available: hasInjectedProvider(),
            },
        }
    }

    /// The MetaMask-flagged variant seen inside the wallet's own embedded
    /// browser. Same provider object, separate connector entry.
    pub fn probe_metamask() -> Self {
        Self {
            descriptor: ConnectorDescriptor {
                id: METAMASK_CONNECTOR_ID.to_string(),
                display_name: "MetaMask".to_string(),
                kind: ConnectorKind::AppSpecific,
                is_available: isMetaMaskProvider(),
            },
        }
    }
}

impl WalletConnector for InjectedConnector {
    fn descriptor(&self) -> ConnectorDescriptor {
        self.descriptor.clone()
    }

    fn request_accounts(&self) -> LocalBoxFuture<'_, Result<Vec<String>, WalletError>> {
        Box::pin(async move {
            match injectedRequestAccounts().await {
                Ok(value) => decode_accounts(value),
                Err(err) => Err(classify_provider_error(&error_message(&err), error_code(&err))),
            }
        })
    }

    fn authorized_accounts(&self) -> LocalBoxFuture<'_, Result<Vec<String>, WalletError>> {
        Box::pin(async move {
            match injectedAuthorizedAccounts().await {
                Ok(value) => decode_accounts(value),
                Err(err) => Err(classify_provider_error(&error_message(&err), error_code(&err))),
            }
        })
    }
}

fn decode_accounts(value: JsValue) -> Result<Vec<String>, WalletError> {
    serde_wasm_bindgen::from_value::<Vec<String>>(value)
        .map_err(|e| WalletError::ProviderFault(format!("malformed account list: {e}")))
}

fn error_message(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

fn error_code(err: &JsValue) -> Option<i32> {
    js_sys::Reflect::get(err, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|c| c as i32)
}

/// Map a raw provider error onto the wallet failure taxonomy. EIP-1193
/// reserves code 4001 for user rejection; some providers only put the word
/// in the message.
pub fn classify_provider_error(message: &str, code: Option<i32>) -> WalletError {
    if code == Some(4001) || message.to_ascii_lowercase().contains("rejected") {
        WalletError::UserRejected
    } else {
        WalletError::ProviderFault(message.to_string())
    }
}

thread_local! {
    // Keeps the event closures alive for the lifetime of the subscription.
    static EVENT_CLOSURES: RefCell<Option<(Closure<dyn Fn(JsValue)>, Closure<dyn Fn(JsValue)>)>> =
        const { RefCell::new(None) };
}

/// Wire the injected provider's push events into the orchestrator. Returns
/// false when no provider (or no event API) exists.
pub fn subscribe_provider_events(orchestrator: Rc<ConnectionOrchestrator>) -> bool {
    let orch_accounts = orchestrator.clone();
    let on_accounts = Closure::new(move |payload: JsValue| {
        match serde_wasm_bindgen::from_value::<Vec<String>>(payload) {
            Ok(accounts) => {
                orch_accounts.on_accounts_changed(INJECTED_CONNECTOR_ID, accounts);
            }
            Err(e) => {
                orch_accounts
                    .on_malformed_event(format!("malformed accountsChanged payload: {e}"));
            }
        }
    });

    let orch_chain = orchestrator;
    let on_chain = Closure::new(move |payload: JsValue| match payload.as_string() {
        Some(chain_id) => orch_chain.on_chain_changed(&chain_id),
        None => orch_chain.on_malformed_event("malformed chainChanged payload".to_string()),
    });

    let subscribed = subscribeInjectedEvents(&on_accounts, &on_chain);
    if subscribed {
        EVENT_CLOSURES.with(|slot| *slot.borrow_mut() = Some((on_accounts, on_chain)));
    }
    subscribed
}

/// Detach the provider event handlers and drop their closures. Idempotent.
pub fn unsubscribe_provider_events() {
    unsubscribeInjectedEvents();
    EVENT_CLOSURES.with(|slot| *slot.borrow_mut() = None);
}

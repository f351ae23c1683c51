//! Connection orchestrator.
//!
//! The state machine coordinating manual connect/disconnect requests, the
//! silent session probe, the auto-connect attempt and provider-pushed
//! events. It is the single source of truth for the session: it exclusively
//! owns and mutates [`ConnectionSession`] and mirrors every change to an
//! observer (the UI installs one that writes the session signal).
//!
//! States: `Disconnected → Connecting → {Connected, Error}`;
//! `Connected → Disconnected` (explicit disconnect or empty-accounts event);
//! `Connected → Connected` (account swap); `Error → Disconnected`
//! (disconnect) or `Error → Connecting` (retry).
//!
//! All transitions run as discrete callbacks on the browser's single thread.
//! The logical race between an in-flight `connect()` future and a pushed
//! `accountsChanged` event is resolved by an attempt token plus a pushed
//! account override, not by locks: the pushed value wins for the account,
//! while the `Connecting` status is only cleared by the attempt's own
//! resolution.

use std::cell::{Cell, RefCell};

use shared::utils::is_valid_address;

use crate::state::session::{ConnectionSession, ConnectionStatus};
use crate::utils::constants::CHAIN_ID;

use super::connector::{ConnectorDescriptor, ConnectorKind, WalletError};
use super::registry::ProviderRegistry;

type SessionObserver = Box<dyn Fn(&ConnectionSession)>;

pub struct ConnectionOrchestrator {
    registry: RefCell<ProviderRegistry>,
    session: RefCell<ConnectionSession>,
    /// Token of the in-flight attempt: the single `Connecting` guard.
    /// Cleared by the attempt's own resolution or by an authoritative
    /// disconnect/empty-accounts event, which stales the attempt.
    attempt: Cell<Option<u64>>,
    next_token: Cell<u64>,
    /// Account pushed by `accountsChanged` while an attempt is in flight;
    /// applied at resolution (last event wins for the account value).
    pushed_account: RefCell<Option<String>>,
    observer: RefCell<Option<SessionObserver>>,
    chain_id: u64,
}

impl ConnectionOrchestrator {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self::with_chain(registry, CHAIN_ID)
    }

    pub fn with_chain(registry: ProviderRegistry, chain_id: u64) -> Self {
        Self {
            registry: RefCell::new(registry),
            session: RefCell::new(ConnectionSession::default()),
            attempt: Cell::new(None),
            next_token: Cell::new(0),
            pushed_account: RefCell::new(None),
            observer: RefCell::new(None),
            chain_id,
        }
    }

    /// Install the observer mirroring session snapshots to the UI. Called
    /// once per mount, before any connection activity.
    pub fn set_observer(&self, observer: impl Fn(&ConnectionSession) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
        self.notify();
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> ConnectionSession {
        self.session.borrow().clone()
    }

    /// Descriptor snapshots from the registry.
    pub fn connectors(&self) -> Vec<ConnectorDescriptor> {
        self.registry.borrow().list_connectors()
    }

    pub fn has_available(&self, kind: ConnectorKind) -> bool {
        self.registry.borrow().has_available(kind)
    }

    /// Re-probe the environment, e.g. after an extension was installed
    /// mid-session.
    pub fn refresh_connectors(&self) {
        self.registry.borrow_mut().refresh();
    }

    /// Establish a session through the given connector. May prompt the user
    /// and suspend for unbounded real time; no timeout is imposed, so an
    /// attempt can stay `Connecting` until the wallet settles the prompt.
    ///
    /// Allowed only from `Disconnected` or `Error`, with at most one
    /// outstanding attempt at a time; precondition failures reject without
    /// touching the session.
    pub async fn connect(&self, connector_id: &str) -> Result<(), WalletError> {
        if self.attempt.get().is_some() {
            return Err(WalletError::AttemptInProgress);
        }
        if self.session.borrow().status == ConnectionStatus::Connected {
            return Err(WalletError::AlreadyConnected);
        }
        let connector = self
            .registry
            .borrow()
            .connector(connector_id)
            .filter(|c| c.descriptor().is_available)
            .ok_or_else(|| WalletError::NoProviderAvailable(connector_id.to_string()))?;

        let token = self.next_token.get();
        self.next_token.set(token + 1);
        self.attempt.set(Some(token));
        self.pushed_account.borrow_mut().take();

        let id = connector_id.to_string();
        self.update(|s| {
            s.status = ConnectionStatus::Connecting;
            s.account = None;
            s.active_connector_id = Some(id);
            s.last_error = None;
        });
        log::info!("connecting via `{}`", connector_id);

        let result = connector.request_accounts().await;

        if self.attempt.get() != Some(token) {
            // Invalidated by a disconnect or an empty-accounts event while
            // the prompt was open; the outcome no longer applies.
            log::info!("stale connection attempt via `{}` ignored", connector_id);
            return Ok(());
        }
        self.attempt.set(None);
        let pushed = self.pushed_account.borrow_mut().take();

        match result {
            Ok(accounts) => {
                match pushed.or_else(|| accounts.into_iter().next()) {
                    Some(account) if is_valid_address(&account) => {
                        log::info!("connected: {}", account);
                        self.update(|s| {
                            s.status = ConnectionStatus::Connected;
                            s.account = Some(account);
                            s.last_error = None;
                        });
                        Ok(())
                    }
                    Some(account) => {
                        let err = WalletError::ProviderFault(format!(
                            "malformed account address `{}`",
                            account
                        ));
                        self.fail_attempt(err.clone());
                        Err(err)
                    }
                    None => {
                        // Session granted but no usable account: soft
                        // failure, not an error state.
                        self.update(|s| *s = ConnectionSession::default());
                        Err(WalletError::EmptyAccountSet)
                    }
                }
            }
            Err(err) => {
                if let Some(account) = pushed {
                    // The provider pushed an authoritative account while
                    // the attempt was settling; the event wins.
                    self.update(|s| {
                        s.status = ConnectionStatus::Connected;
                        s.account = Some(account);
                        s.last_error = None;
                    });
                    return Ok(());
                }
                log::warn!("connection via `{}` failed: {}", connector_id, err);
                self.fail_attempt(err.clone());
                Err(err)
            }
        }
    }

    /// Clear the local session. Always succeeds, from any state, and
    /// invalidates any in-flight attempt. This is local-only: injected
    /// providers cannot be forced to forget an authorization, so the
    /// provider may still remember it (the UI copy says so).
    pub fn disconnect(&self) {
        self.attempt.set(None);
        self.pushed_account.borrow_mut().take();
        self.update(|s| *s = ConnectionSession::default());
        log::info!("wallet session cleared locally");
    }

    /// Provider-pushed `accountsChanged` event. May arrive at any time in
    /// any state and is authoritative for the account value.
    pub fn on_accounts_changed(&self, connector_id: &str, accounts: Vec<String>) {
        let Some(first) = accounts.into_iter().next() else {
            // Provider forgot the session. Stales any in-flight attempt.
            self.attempt.set(None);
            self.pushed_account.borrow_mut().take();
            self.update(|s| *s = ConnectionSession::default());
            return;
        };
        if !is_valid_address(&first) {
            self.on_malformed_event(format!(
                "accountsChanged carried malformed address `{}`",
                first
            ));
            return;
        }
        if self.attempt.get().is_some() {
            // Recorded as the override; the Connecting status is only
            // cleared by the attempt's own resolution.
            *self.pushed_account.borrow_mut() = Some(first);
            return;
        }
        let id = connector_id.to_string();
        self.update(|s| {
            s.status = ConnectionStatus::Connected;
            s.account = Some(first);
            s.active_connector_id = Some(id);
            s.last_error = None;
        });
    }

    /// Provider-pushed `chainChanged` event. Anything other than the single
    /// configured chain means "no usable session": full local reset plus a
    /// registry re-probe.
    pub fn on_chain_changed(&self, raw_chain_id: &str) {
        match parse_chain_id(raw_chain_id) {
            None => self.on_malformed_event(format!(
                "chainChanged carried unparseable id `{}`",
                raw_chain_id
            )),
            Some(id) if id == self.chain_id => {}
            Some(_) => {
                log::warn!("chain changed to `{}`; resetting session", raw_chain_id);
                self.attempt.set(None);
                self.pushed_account.borrow_mut().take();
                self.registry.borrow_mut().refresh();
                self.update(|s| {
                    *s = ConnectionSession {
                        last_error: Some(WalletError::UnsupportedChain(
                            raw_chain_id.to_string(),
                        )),
                        ..ConnectionSession::default()
                    };
                });
            }
        }
    }

    /// A provider event arrived with a payload that failed validation.
    /// Converted to `ProviderFault` at this boundary, never passed through.
    pub fn on_malformed_event(&self, detail: String) {
        log::warn!("malformed provider event: {}", detail);
        let err = WalletError::ProviderFault(detail);
        if self.attempt.get().is_some() {
            // The attempt resolution owns the Connecting status; record
            // the fault without clearing it.
            self.update(|s| s.last_error = Some(err));
            return;
        }
        self.fail_attempt(err);
    }

    /// Silent probe for already-authorized accounts on mount. Never prompts
    /// and never transits through a visible `Connecting` state; probe
    /// failures are swallowed.
    pub async fn detect_existing_session(&self) {
        if self.attempt.get().is_some()
            || self.session.borrow().status != ConnectionStatus::Disconnected
        {
            return;
        }
        let candidates = self.registry.borrow().available_connectors();
        for connector in candidates {
            let descriptor = connector.descriptor();
            match connector.authorized_accounts().await {
                Ok(accounts) if !accounts.is_empty() => {
                    // A manual connect may have started while probing.
                    if self.attempt.get().is_some()
                        || self.session.borrow().status != ConnectionStatus::Disconnected
                    {
                        return;
                    }
                    let first = accounts.into_iter().next().unwrap_or_default();
                    if !is_valid_address(&first) {
                        continue;
                    }
                    log::info!("resumed existing session via `{}`", descriptor.id);
                    self.update(|s| {
                        s.status = ConnectionStatus::Connected;
                        s.account = Some(first);
                        s.active_connector_id = Some(descriptor.id);
                        s.last_error = None;
                    });
                    return;
                }
                Ok(_) => {}
                Err(err) => {
                    log::debug!("silent probe via `{}` failed: {}", descriptor.id, err);
                }
            }
        }
    }

    fn fail_attempt(&self, err: WalletError) {
        self.update(|s| {
            s.status = ConnectionStatus::Error;
            s.account = None;
            s.active_connector_id = None;
            s.last_error = Some(err);
        });
    }

    fn update(&self, f: impl FnOnce(&mut ConnectionSession)) {
        f(&mut self.session.borrow_mut());
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.session.borrow().clone();
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(&snapshot);
        }
    }
}

/// Parse a provider chain id, which arrives as an untyped string in either
/// `0x` hex or decimal form.
fn parse_chain_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        raw.parse().ok()
    }
}

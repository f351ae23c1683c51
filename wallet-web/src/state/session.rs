//! Connection session state.
//!
//! One [`ConnectionSession`] exists per page lifetime. It is exclusively
//! mutated by the connection orchestrator; everything else (pages, navbar,
//! approval gate callers) reads it through the [`SessionContext`] signal
//! mirror.

use leptos::prelude::*;

use crate::services::connector::WalletError;

/// Connection status of the wallet session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    /// A connection attempt is in flight. Transient: resolves to
    /// `Connected`, `Error` or `Disconnected` within one attempt.
    Connecting,
    Connected,
    Error,
}

/// The session state tuple exposed to the UI: status, account, active
/// connector and last normalized error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionSession {
    pub status: ConnectionStatus,
    pub account: Option<String>,
    pub active_connector_id: Option<String>,
    pub last_error: Option<WalletError>,
}

impl ConnectionSession {
    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn is_connecting(&self) -> bool {
        self.status == ConnectionStatus::Connecting
    }

    pub fn address(&self) -> Option<&str> {
        self.account.as_deref()
    }
}

/// Global read-only mirror of the orchestrator-owned session.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: RwSignal<ConnectionSession>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(ConnectionSession::default()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.with(|s| s.is_connected())
    }

    pub fn address(&self) -> Option<String> {
        self.session.with(|s| s.account.clone())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_session_context() -> SessionContext {
    let context = SessionContext::new();
    provide_context(context);
    context
}

pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}

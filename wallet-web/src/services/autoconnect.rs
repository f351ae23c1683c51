//! Auto-connect policy.
//!
//! On handheld form factors the app silently attempts one connection on
//! load, at most once per browsing session. The "already attempted" flag
//! lives in session storage so it survives reloads within the session but
//! not a browser restart, and it is set before the attempt is awaited so a
//! re-render racing the evaluation can never trigger a second prompt.

use crate::services::connector::ConnectorKind;
use crate::services::orchestrator::ConnectionOrchestrator;
use crate::utils::constants::AUTO_CONNECT_ATTEMPTED_KEY;

/// Session-scoped key/value storage. Backed by `sessionStorage` in the
/// browser and by an in-memory map in tests.
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Best-effort `sessionStorage` flags: storage failures (private browsing,
/// quota) degrade to "flag never persists", which at worst repeats the
/// silent attempt on the next reload.
pub struct SessionStorageFlags;

impl FlagStore for SessionStorageFlags {
    fn get(&self, key: &str) -> Option<String> {
        let storage = web_sys::window()?.session_storage().ok()??;
        storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.session_storage().ok().flatten())
        {
            if storage.set_item(key, value).is_err() {
                log::warn!("failed to persist auto-connect flag");
            }
        }
    }
}

pub struct AutoConnectPolicy {
    flags: Box<dyn FlagStore>,
}

impl AutoConnectPolicy {
    pub fn new(flags: Box<dyn FlagStore>) -> Self {
        Self { flags }
    }

    /// True iff all of: handheld form factor, no prior connection, the
    /// session flag is unset, and a remote-pairing connector is available.
    pub fn should_auto_connect(
        &self,
        platform_mobile: bool,
        orchestrator: &ConnectionOrchestrator,
    ) -> bool {
        platform_mobile
            && !orchestrator.session().is_connected()
            && self.flags.get(AUTO_CONNECT_ATTEMPTED_KEY).is_none()
            && orchestrator.has_available(ConnectorKind::RemotePairing)
    }

    /// Record that the one silent attempt was made. Never reset within a
    /// browsing session.
    pub fn mark_attempted(&self) {
        self.flags.set(AUTO_CONNECT_ATTEMPTED_KEY, "1");
    }

    /// Evaluate the policy and run the silent attempt when it applies.
    /// Returns whether an attempt was invoked. The flag is set before the
    /// attempt is awaited; the attempt's outcome (success or failure) lands
    /// in the session and is not retried here.
    pub async fn run(
        &self,
        platform_mobile: bool,
        orchestrator: &ConnectionOrchestrator,
    ) -> bool {
        if !self.should_auto_connect(platform_mobile, orchestrator) {
            return false;
        }
        self.mark_attempted();

        let Some(pairing_id) = orchestrator
            .connectors()
            .into_iter()
            .find(|d| d.kind == ConnectorKind::RemotePairing && d.is_available)
            .map(|d| d.id)
        else {
            return false;
        };

        log::info!("auto-connect: attempting silent connection via `{}`", pairing_id);
        if let Err(err) = orchestrator.connect(&pairing_id).await {
            log::info!("auto-connect attempt did not establish a session: {}", err);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::connector::{WalletConnector, WalletError};
    use crate::services::registry::ProviderRegistry;
    use crate::services::testing::{FakeConnector, MemoryFlags};
    use std::rc::Rc;

    const ACCOUNT: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn orchestrator_with_pairing() -> (ConnectionOrchestrator, Rc<FakeConnector>) {
        let pairing = Rc::new(FakeConnector::available(
            "pairing",
            ConnectorKind::RemotePairing,
        ));
        pairing.push_request_result(Ok(vec![ACCOUNT.to_string()]));
        let orch = ConnectionOrchestrator::with_chain(
            ProviderRegistry::with_connectors(vec![pairing.clone()]),
            11_155_111,
        );
        (orch, pairing)
    }

    #[tokio::test]
    async fn triggers_once_per_session() {
        let (orch, pairing) = orchestrator_with_pairing();
        let policy = AutoConnectPolicy::new(Box::new(MemoryFlags::default()));

        assert!(policy.should_auto_connect(true, &orch));
        assert!(policy.run(true, &orch).await);
        assert!(orch.session().is_connected());

        // Re-evaluations within the same session never trigger again.
        orch.disconnect();
        for _ in 0..5 {
            assert!(!policy.should_auto_connect(true, &orch));
            assert!(!policy.run(true, &orch).await);
        }
        assert_eq!(pairing.request_count(), 1);
    }

    #[tokio::test]
    async fn requires_mobile_platform() {
        let (orch, pairing) = orchestrator_with_pairing();
        let policy = AutoConnectPolicy::new(Box::new(MemoryFlags::default()));

        assert!(!policy.run(false, &orch).await);
        assert_eq!(pairing.request_count(), 0);
    }

    #[tokio::test]
    async fn requires_available_pairing_connector() {
        let pairing: Rc<dyn WalletConnector> = Rc::new(FakeConnector::unavailable(
            "pairing",
            ConnectorKind::RemotePairing,
        ));
        let orch = ConnectionOrchestrator::with_chain(
            ProviderRegistry::with_connectors(vec![pairing]),
            11_155_111,
        );
        let policy = AutoConnectPolicy::new(Box::new(MemoryFlags::default()));

        assert!(!policy.should_auto_connect(true, &orch));
    }

    #[tokio::test]
    async fn skips_when_already_connected() {
        let (orch, pairing) = orchestrator_with_pairing();
        orch.connect("pairing").await.unwrap();
        let policy = AutoConnectPolicy::new(Box::new(MemoryFlags::default()));

        assert!(!policy.should_auto_connect(true, &orch));
        assert_eq!(pairing.request_count(), 1); // only the manual connect
    }

    #[tokio::test]
    async fn flag_is_set_even_when_the_attempt_fails() {
        let pairing = Rc::new(FakeConnector::available(
            "pairing",
            ConnectorKind::RemotePairing,
        ));
        pairing.push_request_result(Err(WalletError::UserRejected));
        let orch = ConnectionOrchestrator::with_chain(
            ProviderRegistry::with_connectors(vec![pairing.clone()]),
            11_155_111,
        );
        let policy = AutoConnectPolicy::new(Box::new(MemoryFlags::default()));

        assert!(policy.run(true, &orch).await);
        assert!(!orch.session().is_connected());
        assert!(!policy.should_auto_connect(true, &orch));
        assert_eq!(pairing.request_count(), 1);
    }
}

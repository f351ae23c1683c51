//! App-lifetime orchestrator ownership.
//!
//! The orchestrator, the session container and the provider event
//! subscription belong to the page lifetime, not to any one route's mount:
//! navigating between routes must neither tear down the `accountsChanged`/
//! `chainChanged` subscription nor reset a live session by rebuilding the
//! orchestrator. The root component calls [`provide_orchestrator_context`]
//! once; routes reach the shared instance through its stored handle.

use std::rc::Rc;

use leptos::prelude::*;

use crate::services::autoconnect::{AutoConnectPolicy, SessionStorageFlags};
use crate::services::connector::ConnectorDescriptor;
use crate::services::injected::{subscribe_provider_events, unsubscribe_provider_events};
use crate::services::orchestrator::ConnectionOrchestrator;
use crate::services::registry::{environment_probe, ProviderRegistry};
use crate::state::session::SessionContext;
use crate::utils::platform::is_mobile_platform;

/// Handle to the shared orchestrator. The `Rc` itself is kept in local
/// storage so the context value stays `Copy + Send` for the view tree.
#[derive(Clone, Copy)]
pub struct OrchestratorContext {
    handle: StoredValue<Rc<ConnectionOrchestrator>, LocalStorage>,
    /// Descriptor snapshots mirrored for the UI; updated on every re-probe.
    pub connectors: RwSignal<Vec<ConnectorDescriptor>>,
}

impl OrchestratorContext {
    pub fn orchestrator(&self) -> Rc<ConnectionOrchestrator> {
        self.handle.get_value()
    }

    /// Re-probe the environment and mirror the result to the UI, so a
    /// late-injecting extension shows up without a reload.
    pub fn refresh_connectors(&self) {
        let orchestrator = self.orchestrator();
        orchestrator.refresh_connectors();
        self.connectors.set(orchestrator.connectors());
    }
}

/// Build the app-lifetime orchestrator, mirror it into the session signal,
/// subscribe to provider events and kick off the silent startup probe.
/// Called once from the root component.
pub fn provide_orchestrator_context(session: SessionContext) -> OrchestratorContext {
    let orchestrator = Rc::new(ConnectionOrchestrator::new(ProviderRegistry::new(
        Box::new(environment_probe),
    )));
    orchestrator.set_observer(move |s| session.session.set(s.clone()));
    if !subscribe_provider_events(orchestrator.clone()) {
        log::info!("no injected provider events to subscribe to");
    }
    on_cleanup(unsubscribe_provider_events);

    let context = OrchestratorContext {
        connectors: RwSignal::new(orchestrator.connectors()),
        handle: StoredValue::new_local(orchestrator),
    };
    provide_context(context);

    // Silent session probe, then the one-shot mobile auto-connect. Delayed a
    // tick so late-injecting extensions have registered their provider.
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(50).await;
        context.refresh_connectors();

        let orchestrator = context.orchestrator();
        orchestrator.detect_existing_session().await;

        let policy = AutoConnectPolicy::new(Box::new(SessionStorageFlags));
        policy.run(is_mobile_platform(), &orchestrator).await;
    });

    context
}

pub fn use_orchestrator_context() -> OrchestratorContext {
    expect_context::<OrchestratorContext>()
}

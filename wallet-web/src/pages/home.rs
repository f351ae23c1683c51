//! Home page: wallet connection and the mock DAO approval demo.
//!
//! The orchestrator and the provider event subscription are app-lifetime
//! state owned by the root component; this page reaches them through
//! [`OrchestratorContext`] and only owns the per-visit approval working
//! state. Everything rendered here reads the [`SessionContext`] signal.

use std::rc::Rc;

use leptos::prelude::*;
use shared::dto::dao::ApprovalResponse;
use shared::utils::truncate_address;

use crate::services::api::HttpDaoApi;
use crate::services::approval::ApprovalGate;
use crate::services::connector::ConnectorKind;
use crate::state::orchestrator::use_orchestrator_context;
use crate::state::session::use_session_context;
use crate::utils::constants::{API_BASE, CHAIN_NAME, DEFAULT_PROPOSAL_ID};
use crate::utils::format::{format_score, format_tally};
use crate::utils::url::get_query_param;

fn unavailability_hint(kind: ConnectorKind) -> &'static str {
    match kind {
        ConnectorKind::Injected => "no browser wallet extension detected",
        ConnectorKind::AppSpecific => "open this page inside the wallet app's browser",
        ConnectorKind::RemotePairing => "pairing is not configured for this build",
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_session_context();
    let octx = use_orchestrator_context();

    let gate = StoredValue::new_local(Rc::new(ApprovalGate::new()));
    let api = StoredValue::new_local(Rc::new(HttpDaoApi::new(API_BASE)));

    let proposal_id =
        get_query_param("proposal").unwrap_or_else(|| DEFAULT_PROPOSAL_ID.to_string());

    let score = RwSignal::new(None::<f64>);
    let approval = RwSignal::new(None::<ApprovalResponse>);
    let notice = RwSignal::new(None::<String>);

    let on_disconnect = move |_| {
        octx.orchestrator().disconnect();
        gate.get_value().reset();
        score.set(None);
        approval.set(None);
        notice.set(Some(
            "Session cleared locally. The wallet may still remember this site.".to_string(),
        ));
    };

    let on_generate_score = move |_| {
        let gate = gate.get_value();
        let api = api.get_value();
        let account = ctx.address();
        notice.set(None);
        leptos::task::spawn_local(async move {
            match gate.generate_score(&*api, account).await {
                Ok(value) => score.set(Some(value)),
                Err(err) => notice.set(Some(err.to_string())),
            }
        });
    };

    let approve_proposal_id = proposal_id.clone();
    let on_approve = move |_| {
        if !ctx.is_connected() {
            notice.set(Some("Connect a wallet before approving.".to_string()));
            return;
        }
        let gate = gate.get_value();
        let api = api.get_value();
        let proposal_id = approve_proposal_id.clone();
        let account = ctx.address();
        notice.set(None);
        leptos::task::spawn_local(async move {
            let timestamp = String::from(js_sys::Date::new_0().to_iso_string());
            let message = format!("I approve proposal #{} at {}", proposal_id, timestamp);
            match gate
                .submit_approval(&*api, account, &proposal_id, message)
                .await
            {
                Ok(response) => approval.set(Some(response)),
                Err(err) => notice.set(Some(err.to_string())),
            }
        });
    };

    let session = ctx.session;

    view! {
        <main class="container">
            <h1>"TrustOS DAO Demo"</h1>
            <p class="subtitle">{format!("Network: {}", CHAIN_NAME)}</p>

            <section class="panel">
                <h2>"Wallet"</h2>
                {move || {
                    let s = session.get();
                    if s.is_connecting() {
                        view! { <p class="status">"Waiting for the wallet prompt..."</p> }
                            .into_any()
                    } else if let Some(account) = s.account.clone() {
                        view! {
                            <p class="status">"Connected: " {truncate_address(&account)}</p>
                        }
                        .into_any()
                    } else {
                        view! { <p class="status">"Not connected"</p> }.into_any()
                    }
                }}
                {move || {
                    session.get().last_error.map(|err| {
                        let retryable = err.is_retryable();
                        view! {
                            <p class="error">
                                {err.to_string()}
                                {retryable
                                    .then(|| view! { <span class="hint">" (try again)"</span> })}
                            </p>
                        }
                    })
                }}
                // Rows follow the registry signal, so a late-injecting
                // extension enables its button after the startup re-probe.
                {move || {
                    octx.connectors
                        .get()
                        .into_iter()
                        .map(|descriptor| {
                            let id = descriptor.id.clone();
                            let hint = unavailability_hint(descriptor.kind);
                            let available = descriptor.is_available;
                            view! {
                                <div class="connector-row">
                                    <button
                                        class="btn-connect"
                                        disabled=!available
                                        on:click=move |_| {
                                            let orchestrator = octx.orchestrator();
                                            let id = id.clone();
                                            notice.set(None);
                                            leptos::task::spawn_local(async move {
                                                if let Err(err) = orchestrator.connect(&id).await {
                                                    notice.set(Some(err.to_string()));
                                                }
                                            });
                                        }
                                    >
                                        {descriptor.display_name.clone()}
                                    </button>
                                    {(!available)
                                        .then(|| view! { <span class="hint">{hint}</span> })}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                <button
                    class="btn-disconnect"
                    on:click=on_disconnect
                    disabled=move || !session.with(|s| s.is_connected())
                >
                    "Disconnect"
                </button>
            </section>

            <section class="panel">
                <h2>{format!("Proposal {}", proposal_id)}</h2>
                <button class="btn-score" on:click=on_generate_score>
                    "Generate Trust Score"
                </button>
                {move || score.get().map(|s| view! { <p class="score">{format_score(s)}</p> })}
                <button class="btn-approve" on:click=on_approve>
                    "Approve Proposal"
                </button>
                {move || {
                    approval.get().map(|r| {
                        view! {
                            <div class="result">
                                <p>{if r.approved { "Approved" } else { "Not approved" }}</p>
                                <p>{format_tally(&r.votes)}</p>
                                <p class="tx-ref">"tx: " {r.tx_ref.clone()}</p>
                            </div>
                        }
                    })
                }}
            </section>

            {move || notice.get().map(|text| view! { <p class="notice">{text}</p> })}
        </main>
    }
}

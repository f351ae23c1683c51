//! Connection status page: read-only session diagnostics.

use leptos::prelude::*;

use crate::state::session::{use_session_context, ConnectionStatus};
use crate::utils::constants::{CHAIN_ID, CHAIN_NAME};

#[component]
pub fn StatusPage() -> impl IntoView {
    let ctx = use_session_context();
    let session = ctx.session;

    view! {
        <div class="app-container">
            <div class="card">
                <h1 class="card-title">"Connection Status"</h1>

                {move || {
                    let s = session.get();
                    let status = match s.status {
                        ConnectionStatus::Disconnected => "Disconnected",
                        ConnectionStatus::Connecting => "Connecting",
                        ConnectionStatus::Connected => "Connected",
                        ConnectionStatus::Error => "Error",
                    };
                    view! {
                        <dl class="status-list">
                            <dt>"Status"</dt>
                            <dd>{status}</dd>

                            <dt>"Account"</dt>
                            <dd class="mono">
                                {s.account.clone().unwrap_or_else(|| "-".to_string())}
                            </dd>

                            <dt>"Connector"</dt>
                            <dd>
                                {s.active_connector_id
                                    .clone()
                                    .unwrap_or_else(|| "-".to_string())}
                            </dd>

                            <dt>"Network"</dt>
                            <dd>{format!("{} ({})", CHAIN_NAME, CHAIN_ID)}</dd>

                            <dt>"Last error"</dt>
                            <dd class="error">
                                {s.last_error
                                    .map(|e| e.to_string())
                                    .unwrap_or_else(|| "-".to_string())}
                            </dd>
                        </dl>
                    }
                }}

                <a href="/" class="btn">"Back to demo"</a>
            </div>
        </div>
    }
}

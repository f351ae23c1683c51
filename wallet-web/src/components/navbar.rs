//! Navigation bar with the connected-account badge.

use leptos::prelude::*;
use leptos_router::components::A;
use shared::utils::truncate_address;

use crate::state::session::use_session_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_session_context();
    let session = ctx.session;

    view! {
        <nav>
            <div class="nav-inner">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"TrustOS"</span>
                </A>
                <A href="/status" attr:class="nav-link">"Status"</A>
                <A href="/about" attr:class="nav-link">"About"</A>
                <span class="nav-account">
                    {move || {
                        session.with(|s| {
                            s.account
                                .as_deref()
                                .map(truncate_address)
                                .unwrap_or_else(|| "not connected".to_string())
                        })
                    }}
                </span>
            </div>
        </nav>
    }
}

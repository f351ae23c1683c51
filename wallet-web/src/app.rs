//! TrustOS wallet demo - Leptos frontend

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};

use crate::components::Navbar;
use crate::pages::{AboutPage, HomePage, StatusPage};
use crate::state::orchestrator::provide_orchestrator_context;
use crate::state::session::provide_session_context;

#[component]
pub fn App() -> impl IntoView {
    let session = provide_session_context();
    provide_orchestrator_context(session);

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/status") view=StatusPage/>
                    <Route path=path!("/about") view=AboutPage/>
                </Routes>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="card">
            <h1>"404 - Page Not Found"</h1>
            <A href="/">"Go to Home"</A>
        </div>
    }
}

//! About page

use leptos::prelude::*;

use crate::utils::constants::CHAIN_NAME;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="app-container">
            <div class="card">
                <h1 class="card-title">"About TrustOS"</h1>
                <p>
                    "TrustOS is a proof-of-concept DAO demo. Connect a wallet, generate a
                    mock trust score and submit a mock approval for a proposal. Nothing is
                    submitted on-chain: the score is a random number dressed up as AI
                    analysis and the approval returns a canned vote tally."
                </p>
                <h2>"What the demo shows"</h2>
                <ul>
                    <li>"Wallet connection via browser extension, wallet-app browser or remote pairing"</li>
                    <li>"Silent session resumption on reload"</li>
                    <li>{format!("A single supported network ({})", CHAIN_NAME)}</li>
                    <li>"A mock trust score and DAO approval flow"</li>
                </ul>
            </div>
        </div>
    }
}

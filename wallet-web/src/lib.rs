//! # TrustOS Wallet Web
//!
//! Browser frontend for the TrustOS DAO proof of concept: wallet connection
//! orchestration plus the mock trust-score and approval flow. Compiled to
//! WebAssembly and mounted with Leptos.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod pages;
pub mod services;
pub mod state;
pub mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("TrustOS wallet demo starting");

    leptos::mount::mount_to_body(|| view! { <App/> });
}

#![allow(non_snake_case)]

use dioxus::prelude::*;
use stores::auth_store;

// Modules
mod components;
mod routes;
mod services;
mod stores;
mod utils;

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }

    log::info!("Starting Estelar client");

    // Launch the Dioxus web app
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Restore the persisted session before any view reads it
    use_effect(move || {
        auth_store::init_auth();
    });

    rsx! {
        Router::<routes::Route> {}
    }
}

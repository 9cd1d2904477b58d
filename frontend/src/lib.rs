use leptos::*;
use leptos_meta::{Title, provide_meta_context};
use wasm_bindgen::prelude::wasm_bindgen;

pub mod assets;
mod components;
pub mod config;
mod logging;

pub use assets::api::{ApiClient, FetchTransport, RawResponse, Transport};
pub use assets::error::{ApiError, TransportError};
pub use assets::store::{ContentView, DashboardState, FetchTicket};
pub use assets::types::{AssetPage, AssetRecord, FilterCriteria};
pub use components::dashboard::Dashboard;
pub use config::ApiConfig;
pub use logging::init_logging;

/// Root component bootstrapping the dashboard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="B3 Asset Dashboard" />
        <main class="app-root">
            <Dashboard />
        </main>
    }
}

/// WASM entry point called automatically by `trunk`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), wasm_bindgen::JsValue> {
    init_logging();
    console_error_panic_hook::set_once();

    leptos::mount_to_body(|| view! { <App /> });
    Ok(())
}

use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::assets::{
    api::ApiClient,
    store::{ContentView, DashboardState, FetchTicket},
    types::FilterCriteria,
};

use super::{asset_chart::AssetChart, asset_table::AssetTable, filters::FiltersPanel};

/// Application shell: owns the view state and runs a fetch for every ticket a
/// transition hands back.
#[component]
pub fn Dashboard() -> impl IntoView {
    let client = ApiClient::from_env();
    log::info!("using assets API at {}", client.config().base_url);
    provide_context(client.clone());

    let state = create_rw_signal(DashboardState::default());

    {
        let client = client.clone();
        spawn_local(async move {
            let healthy = client.check_health().await;
            state.update(|state| state.set_api_health(healthy));
        });
    }

    let dispatch = {
        let client = client.clone();
        move |ticket: FetchTicket| run_fetch(state, client.clone(), ticket)
    };

    if let Some(ticket) = state.try_update(DashboardState::begin_fetch) {
        dispatch(ticket);
    }

    let on_filter = {
        let dispatch = dispatch.clone();
        Callback::new(move |criteria: FilterCriteria| {
            if let Some(ticket) = state.try_update(|state| state.apply_filters(criteria)) {
                dispatch(ticket);
            }
        })
    };

    let on_page_change = {
        let dispatch = dispatch.clone();
        Callback::new(move |page: u32| {
            if let Some(ticket) = state.try_update(|state| state.change_page(page)).flatten() {
                dispatch(ticket);
            }
        })
    };

    let on_page_size_change = Callback::new(move |size: u32| {
        if let Some(ticket) = state.try_update(|state| state.change_page_size(size)).flatten() {
            dispatch(ticket);
        }
    });

    let result = Signal::derive(move || state.with(|state| state.result().cloned()));
    let records = Signal::derive(move || state.with(|state| state.records().to_vec()));
    let page = Signal::derive(move || state.with(DashboardState::page));
    let page_size = Signal::derive(move || state.with(DashboardState::page_size));
    let api_healthy = move || state.with(DashboardState::api_healthy);
    let error = move || state.with(|state| state.error().map(str::to_string));
    let content_view = create_memo(move |_| state.with(DashboardState::content_view));

    view! {
        <div class="dashboard">
            <header class="dashboard__header">
                <h1>"B3 Asset Dashboard"</h1>
                <Show when=move || !api_healthy()>
                    <span class="status-badge status--failed">"API offline"</span>
                </Show>
            </header>
            <section class="dashboard__body">
                {move || error().map(|message| view! {
                    <div class="alert alert--error" role="alert">
                        <span>{message}</span>
                        <button
                            class="alert__close"
                            aria-label="Dismiss"
                            on:click=move |_| state.update(DashboardState::dismiss_error)
                        >
                            "×"
                        </button>
                    </div>
                })}
                <FiltersPanel on_filter=on_filter />
                {move || match content_view.get() {
                    ContentView::Loading => view! {
                        <div class="dashboard__loading">
                            <span class="spinner" aria-label="Loading"></span>
                        </div>
                    }
                    .into_view(),
                    ContentView::Results { show_chart } => view! {
                        <div class="dashboard__results">
                            <Show when=move || show_chart>
                                <AssetChart records=records />
                            </Show>
                            <AssetTable
                                data=result
                                page=page
                                page_size=page_size
                                on_page_change=on_page_change
                                on_page_size_change=on_page_size_change
                            />
                        </div>
                    }
                    .into_view(),
                }}
            </section>
        </div>
    }
}

fn run_fetch(state: RwSignal<DashboardState>, client: ApiClient, ticket: FetchTicket) {
    spawn_local(async move {
        let outcome = client
            .fetch_assets(&ticket.criteria, ticket.page, ticket.page_size)
            .await;
        if let Err(err) = &outcome {
            log::error!("failed to load assets page {}: {err:?}", ticket.page);
        }
        state.update(|state| {
            state.complete_fetch(ticket.generation, outcome);
        });
    });
}

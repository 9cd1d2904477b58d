use chrono::NaiveDate;
use leptos::{ev, *};
use wasm_bindgen_futures::spawn_local;

use crate::assets::{api::ApiClient, types::FilterCriteria};

/// Ticker and date-range inputs. Nothing is committed until Search or Clear.
#[component]
pub fn FiltersPanel(#[prop(into)] on_filter: Callback<FilterCriteria>) -> impl IntoView {
    let client = use_context::<ApiClient>().expect("api client context missing");

    let tickers = create_rw_signal(Vec::<String>::new());
    let ticker = create_rw_signal(String::new());
    let start_date = create_rw_signal(String::new());
    let end_date = create_rw_signal(String::new());

    // Ticker suggestions are optional metadata; a failure only leaves the list empty.
    spawn_local(async move {
        match client.fetch_available_tickers().await {
            Ok(symbols) => tickers.set(symbols),
            Err(err) => log::warn!("failed to load ticker list: {err:?}"),
        }
    });

    let on_search = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let criteria = criteria_from_inputs(
            &ticker.get_untracked(),
            &start_date.get_untracked(),
            &end_date.get_untracked(),
        );
        on_filter.call(criteria);
    };

    let on_clear = move |_: ev::MouseEvent| {
        ticker.set(String::new());
        start_date.set(String::new());
        end_date.set(String::new());
        on_filter.call(FilterCriteria::default());
    };

    view! {
        <form class="filters-panel" on:submit=on_search>
            <label class="filters-panel__field">
                <span>"Ticker"</span>
                <input
                    type="text"
                    list="ticker-options"
                    placeholder="e.g. PETR4"
                    prop:value=move || ticker.get()
                    on:input=move |ev: ev::Event| ticker.set(event_target_value(&ev))
                />
                <datalist id="ticker-options">
                    <For
                        each=move || tickers.get()
                        key=|symbol| symbol.clone()
                        children=|symbol: String| view! { <option value=symbol /> }
                    />
                </datalist>
            </label>
            <label class="filters-panel__field">
                <span>"Start date"</span>
                <input
                    type="date"
                    prop:value=move || start_date.get()
                    on:input=move |ev: ev::Event| start_date.set(event_target_value(&ev))
                />
            </label>
            <label class="filters-panel__field">
                <span>"End date"</span>
                <input
                    type="date"
                    prop:value=move || end_date.get()
                    on:input=move |ev: ev::Event| end_date.set(event_target_value(&ev))
                />
            </label>
            <button type="submit" class="filters-panel__search">"Search"</button>
            <button type="button" class="filters-panel__clear" on:click=on_clear>
                "Clear"
            </button>
        </form>
    }
}

/// Build criteria from raw input values. Blank or malformed fields are left out.
fn criteria_from_inputs(ticker: &str, start_date: &str, end_date: &str) -> FilterCriteria {
    FilterCriteria::new(
        Some(ticker.to_string()),
        parse_date_input(start_date),
        parse_date_input(end_date),
    )
}

fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .inspect_err(|err| log::warn!("ignoring malformed date input {value:?}: {err}"))
        .ok()
}
